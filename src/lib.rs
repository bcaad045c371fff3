pub mod api;
pub mod cli;
pub mod core;
pub mod expenses;
pub mod providers;
pub mod store;
pub mod summary;

use crate::core::config::AppConfig;
use crate::summary::DateRange;
use anyhow::Result;
use std::net::SocketAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Serve { listen: Option<SocketAddr> },
    Summary { range: DateRange },
}

/// Loads configuration (file, then environment) and runs `command`.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    }
    .with_env_overrides();
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve { listen } => cli::serve::run(&config, listen).await,
        AppCommand::Summary { range } => cli::summary::run(&config, range).await,
    }
}
