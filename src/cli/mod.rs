pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "employee-api")]
#[command(about = "Employee records API server and account tooling")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create an API account in the Postgres user store")]
    CreateUser(commands::user::CreateUserArgs),
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::CreateUser(args)) => commands::user::handle(args, config).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
    }
}
