mod router;
mod state;

pub use router::{build_router, demo_routes};
pub use state::ServeState;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use cryptogate_cipher::{CipherEngine, OpensslCipherEngine};
use cryptogate_interceptors::CryptoGate;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Settings;

pub fn build_gate(settings: &Settings, engine: Arc<dyn CipherEngine>) -> CryptoGate {
    CryptoGate::new(settings.route_table(), engine).with_payload_logging(settings.log_payloads)
}

/// Binds `listen` and serves the demo API behind the crypto middleware until
/// ctrl-c.
pub async fn serve(settings: &Settings, listen: SocketAddr) -> Result<()> {
    let engine = OpensslCipherEngine::new(settings.engine_defaults());
    let state = ServeState::new(engine.metrics().clone());
    let gate = Arc::new(build_gate(settings, Arc::new(engine)));
    info!(routes = gate.table().len(), "crypto route table loaded");

    let app = build_router(gate, state);
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;
    info!("cryptogate listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("Server error")
}
