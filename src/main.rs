//! Assistant Bot - Main entry point
//!
//! Runs the interactive contact manager on stdin/stdout. Logs go to stderr so
//! they never interleave with the conversation.

use anyhow::Result;
use assistant_bot::{Config, JsonFileStore, Session};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Configuration first: it carries the fallback log level
    let config = Config::from_env();

    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Using address book at {}", config.data_file.display());
    let store = JsonFileStore::new(config.data_file.clone());
    let mut session = Session::open(store, &config)?;

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout().lock())?;

    info!("Assistant bot shutdown complete");
    Ok(())
}
