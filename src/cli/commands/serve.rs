use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::config::{AppConfig, Environment};
use crate::database::DatabaseManager;
use crate::server;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Use process-local stores instead of Postgres")]
    pub memory: bool,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;
    info!("Starting Employee API in {:?} mode", config.environment);

    let state = build_state(config, args.memory).await?;
    seed_bootstrap_user(&state).await?;

    server::serve(state).await
}

async fn build_state(config: AppConfig, memory: bool) -> anyhow::Result<AppState> {
    if memory {
        warn!("Using in-memory stores; data is lost on exit");
        return Ok(AppState::in_memory(config));
    }

    if config.database.url.is_none() && config.environment == Environment::Development {
        warn!("DATABASE_URL not set; falling back to in-memory stores");
        return Ok(AppState::in_memory(config));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    Ok(AppState::postgres(config, pool))
}

async fn seed_bootstrap_user(state: &AppState) -> anyhow::Result<()> {
    let auth = &state.config.auth;
    let (Some(username), Some(password)) = (&auth.bootstrap_username, &auth.bootstrap_password) else {
        return Ok(());
    };

    if state.auth.ensure_user(username, password).await? {
        info!("Created bootstrap user {}", username);
    }
    Ok(())
}
