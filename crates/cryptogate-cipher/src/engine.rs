//! Cipher engine seam plus the OpenSSL-backed implementation.
//!
//! Values are encrypted as canonical JSON text and ciphertext travels as
//! standard base64, so `decrypt(encrypt(v)) == v` for any JSON value.
//! OpenSSL work runs on the blocking pool; multi-block RSA is CPU-bound.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::canonical::canonical_json_string;
use crate::errors::CryptoError;
use crate::metrics::CryptoMetrics;
use crate::model::{AesOptions, CryptoConfig, MethodConfig, RsaOptions};
use crate::{aes, rsa};

#[async_trait]
pub trait CipherEngine: Send + Sync {
    async fn encrypt(&self, value: &Value, config: &CryptoConfig) -> Result<String, CryptoError>;

    async fn decrypt(&self, ciphertext: &str, config: &CryptoConfig)
        -> Result<Value, CryptoError>;
}

/// Options applied when a resolved config carries none of its own.
#[derive(Clone, Debug, Default)]
pub struct EngineDefaults {
    pub aes: Option<AesOptions>,
    pub rsa: Option<RsaOptions>,
}

#[derive(Clone, Default)]
pub struct OpensslCipherEngine {
    defaults: EngineDefaults,
    metrics: CryptoMetrics,
}

impl OpensslCipherEngine {
    pub fn new(defaults: EngineDefaults) -> Self {
        Self {
            defaults,
            metrics: CryptoMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &CryptoMetrics {
        &self.metrics
    }

    fn aes_options<'a>(
        &'a self,
        own: &'a Option<AesOptions>,
    ) -> Result<&'a AesOptions, CryptoError> {
        own.as_ref()
            .or(self.defaults.aes.as_ref())
            .ok_or_else(|| CryptoError::options("no AES options configured"))
    }

    fn rsa_options<'a>(
        &'a self,
        own: &'a Option<RsaOptions>,
    ) -> Result<&'a RsaOptions, CryptoError> {
        own.as_ref()
            .or(self.defaults.rsa.as_ref())
            .ok_or_else(|| CryptoError::options("no RSA options configured"))
    }

    pub fn seal_bytes(&self, plaintext: &[u8], method: &MethodConfig) -> Result<Vec<u8>, CryptoError> {
        match method {
            MethodConfig::Aes(own) => aes::seal(self.aes_options(own)?, plaintext),
            MethodConfig::Rsa(own) => rsa::seal(self.rsa_options(own)?, plaintext),
        }
    }

    pub fn open_bytes(&self, ciphertext: &[u8], method: &MethodConfig) -> Result<Vec<u8>, CryptoError> {
        match method {
            MethodConfig::Aes(own) => aes::open(self.aes_options(own)?, ciphertext),
            MethodConfig::Rsa(own) => rsa::open(self.rsa_options(own)?, ciphertext),
        }
    }

    fn encrypt_value(&self, value: &Value, config: &CryptoConfig) -> Result<String, CryptoError> {
        let plaintext = canonical_json_string(value)?;
        let sealed = self.seal_bytes(plaintext.as_bytes(), &config.method)?;
        Ok(STANDARD.encode(sealed))
    }

    fn decrypt_value(&self, ciphertext: &str, config: &CryptoConfig) -> Result<Value, CryptoError> {
        let raw = STANDARD
            .decode(ciphertext.trim())
            .map_err(|err| CryptoError::decrypt(&format!("ciphertext is not base64: {err}")))?;
        let opened = self.open_bytes(&raw, &config.method)?;
        let text = String::from_utf8(opened)
            .map_err(|err| CryptoError::decrypt(&format!("plaintext is not UTF-8: {err}")))?;
        let parsed = serde_json::from_str::<Value>(&text);
        match parsed {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(text)),
        }
    }
}

#[async_trait]
impl CipherEngine for OpensslCipherEngine {
    async fn encrypt(&self, value: &Value, config: &CryptoConfig) -> Result<String, CryptoError> {
        let engine = self.clone();
        let (value, owned) = (value.clone(), config.clone());
        let result = tokio::task::spawn_blocking(move || engine.encrypt_value(&value, &owned))
            .await
            .unwrap_or_else(|err| Err(CryptoError::encrypt(&format!("cipher task failed: {err}"))));
        match &result {
            Ok(_) => self.metrics.record_encrypt_ok(),
            Err(err) => {
                self.metrics.record_encrypt_err();
                tracing::debug!(method = %config.method(), code = err.code().0, "encrypt failed");
            }
        }
        result
    }

    async fn decrypt(
        &self,
        ciphertext: &str,
        config: &CryptoConfig,
    ) -> Result<Value, CryptoError> {
        let engine = self.clone();
        let (ciphertext, owned) = (ciphertext.to_string(), config.clone());
        let result = tokio::task::spawn_blocking(move || engine.decrypt_value(&ciphertext, &owned))
            .await
            .unwrap_or_else(|err| Err(CryptoError::decrypt(&format!("cipher task failed: {err}"))));
        match &result {
            Ok(_) => self.metrics.record_decrypt_ok(),
            Err(err) => {
                self.metrics.record_decrypt_err();
                tracing::debug!(method = %config.method(), code = err.code().0, "decrypt failed");
            }
        }
        result
    }
}
