use anyhow::{anyhow, Result};
use clap::Args;
use cryptogate_cipher::{CipherEngine, CryptoConfig, OpensslCipherEngine};
use cryptogate_interceptors::prelude::{is_envelope, CryptoGate};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::config::Settings;

#[derive(Args, Clone)]
pub struct SealArgs {
    /// Route path the payload is for, e.g. /v1/echo
    #[arg(long)]
    pub route: String,

    /// HTTP method of the request
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// JSON value to seal, or ciphertext to open
    pub input: String,
}

fn resolve(settings: &Settings, method: &str, route: &str) -> (OpensslCipherEngine, CryptoConfig) {
    let engine = OpensslCipherEngine::new(settings.engine_defaults());
    let gate = CryptoGate::new(settings.route_table(), Arc::new(engine.clone()));
    // The marker header is assumed, so a config always resolves.
    let config = gate
        .resolve(method, route, true)
        .unwrap_or_else(cryptogate_interceptors::prelude::default_config);
    (engine, config)
}

/// Non-JSON input is sealed as a JSON string.
pub async fn seal_text(settings: &Settings, method: &str, route: &str, input: &str) -> Result<String> {
    let (engine, config) = resolve(settings, method, route);
    if !config.should_decrypt() {
        warn!(%route, direction = %config.direction, "route does not decrypt requests");
    }
    let value = serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string()));
    engine
        .encrypt(&value, &config)
        .await
        .map_err(|e| anyhow!("seal failed: {}", e.dev_message().unwrap_or("unknown error")))
}

/// Accepts a bare ciphertext or a response envelope whose `data` is encrypted.
pub async fn open_text(settings: &Settings, method: &str, route: &str, input: &str) -> Result<Value> {
    let (engine, config) = resolve(settings, method, route);
    let open = |ciphertext: String| {
        let engine = engine.clone();
        let config = config.clone();
        async move {
            engine
                .decrypt(&ciphertext, &config)
                .await
                .map_err(|e| anyhow!("open failed: {}", e.dev_message().unwrap_or("unknown error")))
        }
    };

    match serde_json::from_str::<Value>(input) {
        Ok(mut envelope) if is_envelope(&envelope) => {
            if let Some(Value::String(data)) = envelope.get("data").cloned() {
                envelope["data"] = open(data).await?;
            }
            Ok(envelope)
        }
        Ok(Value::String(ciphertext)) => open(ciphertext).await,
        _ => open(input.trim().to_string()).await,
    }
}

pub async fn cmd_seal(args: SealArgs, settings: &Settings) -> Result<()> {
    let ciphertext = seal_text(settings, &args.method, &args.route, &args.input).await?;
    println!("{ciphertext}");
    Ok(())
}

pub async fn cmd_open(args: SealArgs, settings: &Settings) -> Result<()> {
    let value = open_text(settings, &args.method, &args.route, &args.input).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
