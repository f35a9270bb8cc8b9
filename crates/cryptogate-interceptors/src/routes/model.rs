use cryptogate_cipher::{AesOptions, CryptoConfig, CryptoDirection, CryptoMethod, MethodConfig, RsaOptions};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RouteCryptoSpec {
    pub when: MatchCond,
    pub crypto: RouteCryptoMetadata,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCond {
    Http { method: String, path_glob: String },
}

/// Crypto requirements attached to one route at startup.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RouteCryptoMetadata {
    pub method: CryptoMethod,
    #[serde(default)]
    pub direction: CryptoDirection,
    #[serde(default)]
    pub options: RouteCryptoOptions,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RouteCryptoOptions {
    #[serde(default)]
    pub aes: Option<AesOptions>,
    #[serde(default)]
    pub rsa: Option<RsaOptions>,
}

impl RouteCryptoMetadata {
    pub fn new(method: CryptoMethod, direction: CryptoDirection) -> Self {
        Self {
            method,
            direction,
            options: RouteCryptoOptions::default(),
        }
    }

    pub fn with_aes(mut self, options: AesOptions) -> Self {
        self.options.aes = Some(options);
        self
    }

    pub fn with_rsa(mut self, options: RsaOptions) -> Self {
        self.options.rsa = Some(options);
        self
    }

    /// Builds the per-request config. Only the option branch matching
    /// `method` is read.
    pub fn to_config(&self) -> CryptoConfig {
        let method = match self.method {
            CryptoMethod::Aes => MethodConfig::Aes(self.options.aes.clone()),
            CryptoMethod::Rsa => MethodConfig::Rsa(self.options.rsa.clone()),
        };
        CryptoConfig {
            direction: self.direction,
            method,
        }
    }
}
