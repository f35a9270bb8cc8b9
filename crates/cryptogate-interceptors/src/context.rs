use async_trait::async_trait;
use cryptogate_cipher::canonical::canonical_json_string;
use cryptogate_cipher::CryptoConfig;
use serde_json::Value;

use crate::errors::InterceptError;

/// Per-request interception state. Created fresh for every request.
#[derive(Clone, Debug, Default)]
pub struct InterceptContext {
    pub request_id: String,
    pub route: Option<String>,
    pub crypto: Option<CryptoConfig>,
    pub log_payloads: bool,
}

/// Request or response body as seen by the crypto stages.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    Text(String),
    Json(Value),
}

impl Payload {
    /// Classifies raw body bytes. A bare JSON string is unwrapped into `Text`
    /// so ciphertext sent as `"..."` and as plain text read the same.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InterceptError> {
        if bytes.is_empty() {
            return Ok(Payload::Empty);
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|err| InterceptError::serialization(&format!("body is not UTF-8: {err}")))?;
        match serde_json::from_str::<Value>(text) {
            Ok(Value::String(inner)) => Ok(Payload::Text(inner)),
            Ok(value) => Ok(Payload::Json(value)),
            Err(_) => Ok(Payload::Text(text.to_string())),
        }
    }

    /// Request-side emptiness: no body, an empty string or `null` carry no
    /// ciphertext to decrypt.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Text(text) => text.is_empty(),
            Payload::Json(value) => value.is_null(),
        }
    }

    /// String form handed to the cipher engine for decryption.
    pub fn to_cipher_input(&self) -> Result<String, InterceptError> {
        match self {
            Payload::Empty => Ok(String::new()),
            Payload::Text(text) => Ok(text.clone()),
            Payload::Json(value) => canonical_json_string(value)
                .map_err(|err| InterceptError::serialization(err.dev_message().unwrap_or("canonical json failed"))),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Payload::Empty => Value::Null,
            Payload::Text(text) => Value::String(text),
            Payload::Json(value) => value,
        }
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Payload::Empty => None,
            Payload::Text(_) => Some("text/plain; charset=utf-8"),
            Payload::Json(_) => Some("application/json"),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Empty => Vec::new(),
            Payload::Text(text) => text.into_bytes(),
            Payload::Json(value) => serde_json::to_vec(&value).unwrap_or_default(),
        }
    }
}

#[async_trait]
pub trait ProtoRequest: Send {
    fn method(&self) -> &str;
    fn path(&self) -> &str;

    /// Route template the framework matched, when it exposes one.
    fn route(&self) -> Option<&str> {
        None
    }

    fn header(&self, name: &str) -> Option<String>;

    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    async fn read_payload(&mut self) -> Result<Payload, InterceptError>;

    fn replace_payload(&mut self, payload: Payload);
}

#[async_trait]
pub trait ProtoResponse: Send {
    fn status(&self) -> u16;
    async fn read_payload(&mut self) -> Result<Payload, InterceptError>;
    fn replace_payload(&mut self, payload: Payload);
}
