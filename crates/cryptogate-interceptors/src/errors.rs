use cryptogate_cipher::{CryptoError, CryptoMethod};
use cryptogate_errors::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct InterceptError(pub ErrorObj);

impl InterceptError {
    pub fn into_inner(self) -> ErrorObj {
        self.0
    }

    pub fn inner(&self) -> &ErrorObj {
        &self.0
    }

    pub fn internal(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::UNKNOWN_INTERNAL)
                .dev_msg(msg)
                .build(),
        )
    }

    pub fn serialization(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::CRYPTO_SERIALIZATION)
                .dev_msg(msg)
                .build(),
        )
    }

    /// Wraps a cipher failure, keeping its code and tagging stage and method.
    pub fn from_crypto(err: CryptoError, stage: &'static str, method: CryptoMethod) -> Self {
        let mut obj = err.into_inner();
        obj.meta
            .insert("stage".into(), serde_json::Value::String(stage.into()));
        obj.meta.insert(
            "method".into(),
            serde_json::Value::String(method.as_str().into()),
        );
        InterceptError(obj)
    }

    pub fn correlated(self, request_id: &str) -> Self {
        if request_id.is_empty() {
            return self;
        }
        InterceptError(self.0.with_correlation(request_id))
    }
}

/// Status and body for the wire. Only the public view is rendered.
pub fn to_http_response(err: &InterceptError) -> (u16, serde_json::Value) {
    let obj = &err.0;
    let public = obj.to_public();
    (
        obj.http_status,
        serde_json::json!({
            "code": public.code,
            "message": public.message,
            "correlation_id": public.correlation_id
        }),
    )
}
