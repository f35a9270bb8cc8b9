use std::sync::Arc;

use crate::context::{InterceptContext, Payload, ProtoRequest};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use cryptogate_cipher::CipherEngine;
use tracing::{debug, error};

pub struct DecryptRequestStage {
    engine: Arc<dyn CipherEngine>,
}

impl DecryptRequestStage {
    pub fn new(engine: Arc<dyn CipherEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Stage for DecryptRequestStage {
    async fn before(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
    ) -> Result<StageOutcome, InterceptError> {
        let Some(config) = cx.crypto.as_ref() else {
            return Ok(StageOutcome::Continue);
        };
        if !config.should_decrypt() {
            return Ok(StageOutcome::Continue);
        }

        let payload = req
            .read_payload()
            .await
            .map_err(|err| err.correlated(&cx.request_id))?;
        if payload.is_empty() {
            debug!(request_id = %cx.request_id, "request body is empty, skipping decryption");
            return Ok(StageOutcome::Continue);
        }

        let ciphertext = payload
            .to_cipher_input()
            .map_err(|err| err.correlated(&cx.request_id))?;
        let plaintext = match self.engine.decrypt(&ciphertext, config).await {
            Ok(value) => value,
            Err(err) => {
                let err = InterceptError::from_crypto(err, "decrypt_request", config.method())
                    .correlated(&cx.request_id);
                error!(
                    request_id = %cx.request_id,
                    method = %config.method(),
                    code = err.inner().code.0,
                    reason = err.inner().message_dev.as_deref().unwrap_or(""),
                    "failed to decrypt request body"
                );
                return Err(err);
            }
        };

        if cx.log_payloads {
            debug!(request_id = %cx.request_id, body = %plaintext, "request body decrypted");
        }
        req.replace_payload(Payload::Json(plaintext));
        Ok(StageOutcome::Continue)
    }
}
