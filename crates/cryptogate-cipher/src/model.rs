//! Value types describing how a single request/response exchange is protected.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoMethod {
    Aes,
    Rsa,
}

impl CryptoMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            CryptoMethod::Aes => "AES",
            CryptoMethod::Rsa => "RSA",
        }
    }
}

impl fmt::Display for CryptoMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side(s) of the exchange are transformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoDirection {
    Encrypt,
    Decrypt,
    #[default]
    Both,
}

impl CryptoDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            CryptoDirection::Encrypt => "ENCRYPT",
            CryptoDirection::Decrypt => "DECRYPT",
            CryptoDirection::Both => "BOTH",
        }
    }

    /// True when the inbound body must be decrypted before the handler runs.
    pub const fn should_decrypt(self) -> bool {
        matches!(self, CryptoDirection::Decrypt | CryptoDirection::Both)
    }

    /// True when the handler result must be encrypted before it leaves.
    pub const fn should_encrypt(self) -> bool {
        matches!(self, CryptoDirection::Encrypt | CryptoDirection::Both)
    }
}

impl fmt::Display for CryptoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const fn should_decrypt(direction: CryptoDirection) -> bool {
    direction.should_decrypt()
}

pub const fn should_encrypt(direction: CryptoDirection) -> bool {
    direction.should_encrypt()
}

/// AES-CBC shared secret. Both values are used as raw UTF-8 bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AesOptions {
    pub key: String,
    pub iv: String,
}

impl fmt::Debug for AesOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesOptions")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("iv", &format_args!("<{} bytes>", self.iv.len()))
            .finish()
    }
}

/// PEM encoded RSA key pair. Encryption needs the public half, decryption the
/// private half.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaOptions {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl fmt::Debug for RsaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaOptions")
            .field("public_key", &self.public_key.is_some())
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Method together with its option branch. `None` defers to the engine
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MethodConfig {
    Aes(Option<AesOptions>),
    Rsa(Option<RsaOptions>),
}

impl MethodConfig {
    pub fn method(&self) -> CryptoMethod {
        match self {
            MethodConfig::Aes(_) => CryptoMethod::Aes,
            MethodConfig::Rsa(_) => CryptoMethod::Rsa,
        }
    }
}

/// Effective crypto settings for one request. Built fresh per request and
/// dropped with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoConfig {
    pub direction: CryptoDirection,
    pub method: MethodConfig,
}

impl CryptoConfig {
    pub fn aes(direction: CryptoDirection, options: Option<AesOptions>) -> Self {
        Self {
            direction,
            method: MethodConfig::Aes(options),
        }
    }

    pub fn rsa(direction: CryptoDirection, options: Option<RsaOptions>) -> Self {
        Self {
            direction,
            method: MethodConfig::Rsa(options),
        }
    }

    pub fn method(&self) -> CryptoMethod {
        self.method.method()
    }

    pub fn should_decrypt(&self) -> bool {
        self.direction.should_decrypt()
    }

    pub fn should_encrypt(&self) -> bool {
        self.direction.should_encrypt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_gate_is_exhaustive() {
        assert!(should_decrypt(CryptoDirection::Decrypt));
        assert!(should_decrypt(CryptoDirection::Both));
        assert!(!should_decrypt(CryptoDirection::Encrypt));

        assert!(should_encrypt(CryptoDirection::Encrypt));
        assert!(should_encrypt(CryptoDirection::Both));
        assert!(!should_encrypt(CryptoDirection::Decrypt));
    }

    #[test]
    fn enums_use_upper_case_names() {
        let method: CryptoMethod = serde_json::from_str("\"RSA\"").unwrap();
        assert_eq!(method, CryptoMethod::Rsa);
        let direction: CryptoDirection = serde_json::from_str("\"ENCRYPT\"").unwrap();
        assert_eq!(direction, CryptoDirection::Encrypt);
        assert_eq!(
            serde_json::to_string(&CryptoDirection::Both).unwrap(),
            "\"BOTH\""
        );
    }

    #[test]
    fn config_method_follows_option_branch() {
        let config = CryptoConfig::rsa(CryptoDirection::Decrypt, None);
        assert_eq!(config.method(), CryptoMethod::Rsa);
        assert!(config.should_decrypt());
        assert!(!config.should_encrypt());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let aes = AesOptions {
            key: "0123456789abcdef".into(),
            iv: "fedcba9876543210".into(),
        };
        let rendered = format!("{aes:?}");
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("16 bytes"));
    }
}
