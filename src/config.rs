//! Service settings: YAML file, then environment overrides, then validation.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cryptogate_cipher::{aes, rsa};
use cryptogate_cipher::{AesOptions, CryptoError, EngineDefaults, RsaOptions};
use cryptogate_errors::prelude::*;
use cryptogate_interceptors::prelude::{RouteCryptoSpec, RouteCryptoTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_LISTEN: &str = "CRYPTOGATE_LISTEN";
pub const ENV_LOG_LEVEL: &str = "CRYPTOGATE_LOG_LEVEL";
pub const ENV_LOG_PAYLOADS: &str = "CRYPTOGATE_LOG_PAYLOADS";
pub const ENV_AES_KEY: &str = "CRYPTOGATE_AES_KEY";
pub const ENV_AES_IV: &str = "CRYPTOGATE_AES_IV";

#[derive(Debug, Error)]
#[error("{}", describe(.0))]
pub struct SettingsError(pub ErrorObj);

fn describe(err: &ErrorObj) -> &str {
    err.message_dev.as_deref().unwrap_or(&err.message_user)
}

impl SettingsError {
    fn invalid(msg: impl Into<String>) -> Self {
        SettingsError(ErrorBuilder::new(codes::CONFIG_INVALID).dev_msg(msg).build())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listen: SocketAddr,
    pub log_level: String,
    pub log_json: bool,
    /// Log decrypted/plaintext bodies at debug level.
    pub log_payloads: bool,
    pub aes: Option<AesOptions>,
    pub rsa: Option<RsaOptions>,
    pub routes: Vec<RouteCryptoSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8788)),
            log_level: "info".to_string(),
            log_json: false,
            log_payloads: false,
            aes: None,
            rsa: None,
            routes: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config file")
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        if let Ok(listen) = env::var(ENV_LISTEN) {
            self.listen = listen
                .parse()
                .map_err(|e| SettingsError::invalid(format!("{ENV_LISTEN}={listen}: {e}")))?;
        }
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Ok(flag) = env::var(ENV_LOG_PAYLOADS) {
            self.log_payloads = matches!(flag.trim(), "1" | "true" | "yes" | "on");
        }

        let key = env::var(ENV_AES_KEY).ok();
        let iv = env::var(ENV_AES_IV).ok();
        if key.is_some() || iv.is_some() {
            let current = self.aes.take();
            let (old_key, old_iv) = current
                .map(|aes| (aes.key, aes.iv))
                .unwrap_or_default();
            self.aes = Some(AesOptions {
                key: key.unwrap_or(old_key),
                iv: iv.unwrap_or(old_iv),
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| SettingsError::invalid(format!("unknown log level '{}'", self.log_level)))?;

        let invalid = |scope: String, e: CryptoError| {
            SettingsError::invalid(format!("{scope}: {}", e.dev_message().unwrap_or("invalid")))
        };

        if let Some(options) = &self.aes {
            aes::validate(options).map_err(|e| invalid("default aes options".into(), e))?;
        }
        if let Some(options) = &self.rsa {
            rsa::validate(options).map_err(|e| invalid("default rsa options".into(), e))?;
        }
        for route in &self.routes {
            let options = &route.crypto.options;
            if let Some(aes_options) = &options.aes {
                aes::validate(aes_options).map_err(|e| invalid(format!("route {:?}", route.when), e))?;
            }
            if let Some(rsa_options) = &options.rsa {
                rsa::validate(rsa_options).map_err(|e| invalid(format!("route {:?}", route.when), e))?;
            }
        }
        Ok(())
    }

    pub fn engine_defaults(&self) -> EngineDefaults {
        EngineDefaults {
            aes: self.aes.clone(),
            rsa: self.rsa.clone(),
        }
    }

    pub fn route_table(&self) -> RouteCryptoTable {
        RouteCryptoTable::new(self.routes.clone())
    }
}

pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    /// False when `path` did not exist and defaults were used.
    pub found: bool,
}

pub fn default_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("cryptogate");
    path.push("config.yaml");
    Ok(path)
}

/// Reads the file (defaults when missing), applies env overrides and validates.
/// Runs before logging is installed, so it reports through `LoadedSettings`.
pub async fn load_settings(config_path: Option<&Path>) -> Result<LoadedSettings> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let found = path.exists();
    let mut settings = if found {
        let content = tokio::fs::read_to_string(&path)
            .await
            .context("Failed to read config file")?;
        Settings::from_yaml(&content)?
    } else {
        Settings::default()
    };

    settings.apply_env_overrides()?;
    settings.validate()?;
    Ok(LoadedSettings {
        settings,
        path,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptogate_cipher::{CryptoDirection, CryptoMethod};
    use cryptogate_interceptors::prelude::{MatchCond, RouteCryptoMetadata};

    #[test]
    fn defaults_are_quiet_and_local() {
        let settings = Settings::default();
        assert_eq!(settings.listen.to_string(), "127.0.0.1:8788");
        assert!(!settings.log_payloads);
        assert!(settings.routes.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let settings = Settings::from_yaml(
            r#"
log_level: debug
routes:
  - when:
      http:
        method: POST
        path_glob: /v1/echo
    crypto:
      method: RSA
"#,
        )
        .unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.listen.port(), 8788);
        assert_eq!(settings.routes.len(), 1);
        assert_eq!(
            settings.routes[0].crypto.direction,
            cryptogate_cipher::CryptoDirection::Both
        );
    }

    #[test]
    fn short_aes_key_is_a_config_error() {
        let settings = Settings {
            aes: Some(AesOptions {
                key: "short".into(),
                iv: "0123456789abcdef".into(),
            }),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.0.code, codes::CONFIG_INVALID);
    }

    #[test]
    fn malformed_rsa_pem_is_a_config_error() {
        let bad = RsaOptions {
            public_key: Some("not a pem".into()),
            private_key: None,
        };
        let settings = Settings {
            rsa: Some(bad.clone()),
            ..Settings::default()
        };
        assert_eq!(settings.validate().unwrap_err().0.code, codes::CONFIG_INVALID);

        let route = RouteCryptoSpec {
            when: MatchCond::Http {
                method: "POST".into(),
                path_glob: "/v1/secure".into(),
            },
            crypto: RouteCryptoMetadata::new(CryptoMethod::Rsa, CryptoDirection::Both)
                .with_rsa(bad),
        };
        let settings = Settings {
            routes: vec![route],
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.0.code, codes::CONFIG_INVALID);
        assert!(err.to_string().contains("/v1/secure"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let settings = Settings {
            log_level: "loud".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
