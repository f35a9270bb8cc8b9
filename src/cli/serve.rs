use std::net::SocketAddr;

use anyhow::Result;
use clap::Args;

use crate::config::Settings;
use crate::server::serve;

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// HTTP listener address (host:port); defaults to `listen` from the config
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}

pub async fn cmd_serve(args: ServeArgs, settings: &Settings) -> Result<()> {
    let listen = args.listen.unwrap_or(settings.listen);
    serve(settings, listen).await
}
