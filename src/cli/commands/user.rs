use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::Registration;
use crate::state::AppState;

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long, help = "Account username")]
    pub username: String,

    #[arg(long, env = "CREATE_USER_PASSWORD", help = "Account password (min 8 characters)")]
    pub password: String,

    #[arg(long, help = "Optional contact email")]
    pub email: Option<String>,
}

pub async fn handle(args: CreateUserArgs, config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    let state = AppState::postgres(config, pool.clone());

    let user = state
        .auth
        .register(Registration {
            username: Some(args.username),
            email: args.email,
            password: Some(args.password),
        })
        .await?;

    println!("Created user {} (id {})", user.username, user.id);
    DatabaseManager::close(&pool).await;
    Ok(())
}
