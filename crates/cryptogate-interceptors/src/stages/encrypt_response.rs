use std::sync::Arc;

use crate::context::{InterceptContext, Payload, ProtoResponse};
use crate::envelope::is_envelope_map;
use crate::errors::InterceptError;
use crate::stages::Stage;
use async_trait::async_trait;
use cryptogate_cipher::{CipherEngine, CryptoConfig};
use serde_json::Value;
use tracing::{debug, error};

pub struct EncryptResponseStage {
    engine: Arc<dyn CipherEngine>,
}

impl EncryptResponseStage {
    pub fn new(engine: Arc<dyn CipherEngine>) -> Self {
        Self { engine }
    }

    /// Envelopes keep their shape with only `data` replaced by ciphertext;
    /// anything else becomes a bare ciphertext body.
    pub async fn encrypt_payload(
        &self,
        payload: Payload,
        config: &CryptoConfig,
        log_payloads: bool,
    ) -> Result<Payload, cryptogate_cipher::CryptoError> {
        match payload.into_value() {
            Value::Object(mut map) if is_envelope_map(&map) => {
                let data = map.remove("data").unwrap_or(Value::Null);
                if log_payloads {
                    debug!(data = %data, "encrypting envelope data");
                }
                let ciphertext = self.engine.encrypt(&data, config).await?;
                map.insert("data".into(), Value::String(ciphertext));
                Ok(Payload::Json(Value::Object(map)))
            }
            other => {
                if log_payloads {
                    debug!(body = %other, "encrypting full response");
                }
                let ciphertext = self.engine.encrypt(&other, config).await?;
                Ok(Payload::Text(ciphertext))
            }
        }
    }
}

#[async_trait]
impl Stage for EncryptResponseStage {
    async fn after(
        &self,
        cx: &mut InterceptContext,
        rsp: &mut dyn ProtoResponse,
    ) -> Result<(), InterceptError> {
        let Some(config) = cx.crypto.as_ref() else {
            return Ok(());
        };
        if !config.should_encrypt() {
            return Ok(());
        }
        let status = rsp.status();
        if !(200..300).contains(&status) {
            debug!(request_id = %cx.request_id, status, "leaving non-success response unencrypted");
            return Ok(());
        }

        let payload = rsp
            .read_payload()
            .await
            .map_err(|err| err.correlated(&cx.request_id))?;
        // `null` and `""` are results too; only a zero-byte body is left alone.
        if matches!(payload, Payload::Empty) {
            return Ok(());
        }

        match self.encrypt_payload(payload, config, cx.log_payloads).await {
            Ok(encrypted) => {
                rsp.replace_payload(encrypted);
                Ok(())
            }
            Err(err) => {
                let err = InterceptError::from_crypto(err, "encrypt_response", config.method())
                    .correlated(&cx.request_id);
                error!(
                    request_id = %cx.request_id,
                    method = %config.method(),
                    code = err.inner().code.0,
                    reason = err.inner().message_dev.as_deref().unwrap_or(""),
                    "failed to encrypt response"
                );
                Err(err)
            }
        }
    }
}
