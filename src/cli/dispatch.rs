use anyhow::Result;

use super::commands::Commands;
use super::env::CliArgs;
use super::seal::{cmd_open, cmd_seal};
use super::serve::cmd_serve;
use crate::config::Settings;

pub async fn dispatch(cli: &CliArgs, settings: &Settings) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve(args) => cmd_serve(args, settings).await,
        Commands::Seal(args) => cmd_seal(args, settings).await,
        Commands::Open(args) => cmd_open(args, settings).await,
    }
}
