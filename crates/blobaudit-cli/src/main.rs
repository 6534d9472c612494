mod cli;
mod commands;

use anyhow::Result;
use blobaudit_config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    // Configuration is read once per run
    let mut config = Config::load_with_env()?;
    if let Some(connection_string) = cli
        .connection_string
        .filter(|value| !value.trim().is_empty())
    {
        config.store.connection_string = Some(connection_string);
    }
    if let Some(timeout) = cli.connect_timeout {
        config.store.connect_timeout_secs = timeout;
    }
    tracing::debug!(path = %Config::config_path().display(), "Loaded configuration");

    match cli.command {
        cli::Commands::Ingest { file, name, length } => {
            commands::ingest::handle(file, name, length, &config.store).await
        }
        cli::Commands::Count => commands::audit::count(&config.store).await,
        cli::Commands::List { limit, json } => {
            commands::audit::list(&config.store, limit, json).await
        }
        cli::Commands::Init => commands::audit::init(&config.store).await,
    }
}
