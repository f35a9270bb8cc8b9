use crate::class::{ErrorKind, RetryClass, Severity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub &'static str);

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match REGISTRY.get_key_value(s.as_str()) {
            Some((key, _)) => Ok(ErrorCode(key)),
            None => Err(serde::de::Error::custom(format!("unknown error code: {s}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodeSpec {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub http_status: u16,
    pub retryable: RetryClass,
    pub severity: Severity,
    pub default_user_msg: &'static str,
}

pub mod codes {
    use super::ErrorCode;

    pub const CRYPTO_DECRYPT: ErrorCode = ErrorCode("CRYPTO.DECRYPT_FAILED");
    pub const CRYPTO_ENCRYPT: ErrorCode = ErrorCode("CRYPTO.ENCRYPT_FAILED");
    pub const CRYPTO_SERIALIZATION: ErrorCode = ErrorCode("CRYPTO.SERIALIZATION_FAILED");
    pub const CRYPTO_OPTIONS: ErrorCode = ErrorCode("CRYPTO.OPTIONS_INVALID");
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("CONFIG.INVALID");
    pub const UNKNOWN_INTERNAL: ErrorCode = ErrorCode("UNKNOWN.INTERNAL");
}

pub static REGISTRY: Lazy<HashMap<&'static str, CodeSpec>> = Lazy::new(|| {
    use codes::*;

    let mut map = HashMap::new();
    let mut add = |spec: CodeSpec| {
        let key = spec.code.0;
        if map.insert(key, spec).is_some() {
            panic!("duplicate error code: {}", key);
        }
    };

    add(CodeSpec {
        code: CRYPTO_DECRYPT,
        kind: ErrorKind::Crypto,
        http_status: 500,
        retryable: RetryClass::Permanent,
        severity: Severity::Error,
        default_user_msg: "Unable to decrypt request payload.",
    });

    add(CodeSpec {
        code: CRYPTO_ENCRYPT,
        kind: ErrorKind::Crypto,
        http_status: 500,
        retryable: RetryClass::Permanent,
        severity: Severity::Error,
        default_user_msg: "Unable to encrypt response payload.",
    });

    add(CodeSpec {
        code: CRYPTO_SERIALIZATION,
        kind: ErrorKind::Serialization,
        http_status: 500,
        retryable: RetryClass::Permanent,
        severity: Severity::Error,
        default_user_msg: "Payload could not be serialised for encryption.",
    });

    add(CodeSpec {
        code: CRYPTO_OPTIONS,
        kind: ErrorKind::Crypto,
        http_status: 500,
        retryable: RetryClass::Permanent,
        severity: Severity::Critical,
        default_user_msg: "Crypto options are missing or malformed.",
    });

    add(CodeSpec {
        code: CONFIG_INVALID,
        kind: ErrorKind::Config,
        http_status: 500,
        retryable: RetryClass::Permanent,
        severity: Severity::Critical,
        default_user_msg: "Service configuration is invalid.",
    });

    add(CodeSpec {
        code: UNKNOWN_INTERNAL,
        kind: ErrorKind::Unknown,
        http_status: 500,
        retryable: RetryClass::Transient,
        severity: Severity::Critical,
        default_user_msg: "Internal error. Please retry later.",
    });

    map
});

pub fn spec_of(code: ErrorCode) -> &'static CodeSpec {
    REGISTRY
        .get(code.0)
        .unwrap_or_else(|| &REGISTRY[codes::UNKNOWN_INTERNAL.0])
}
