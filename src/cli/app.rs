use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use super::dispatch::dispatch;
use super::env::CliArgs;
use crate::config::{load_settings, LoadedSettings};
use crate::logging::init_logging;

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let LoadedSettings {
        mut settings,
        path,
        found,
    } = load_settings(cli.config.as_deref()).await?;
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    init_logging(&settings.log_level, cli.debug, settings.log_json)?;
    if found {
        info!("Loaded configuration from: {}", path.display());
    } else {
        warn!("Config file not found, using defaults: {}", path.display());
    }

    match dispatch(&cli, &settings).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
