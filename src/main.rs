use std::sync::Arc;

use clap::Parser;
use forge::config::{Cli, Config};
use forge::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_cli(&cli)?;
    cfg.validate()?;

    if let Some(dir) = &cfg.files.directory {
        tracing::info!(directory = %dir, "Serving files");
    }

    tokio::select! {
        res = server::run(Arc::new(cfg)) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
