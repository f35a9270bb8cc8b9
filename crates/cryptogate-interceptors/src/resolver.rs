//! Decides which crypto config, if any, applies to a request.
//!
//! Route metadata is authoritative. Without metadata, the presence of the
//! marker header alone selects AES in both directions with engine-default
//! options. With neither, the request is not intercepted at all.

use cryptogate_cipher::{CryptoConfig, CryptoDirection};

use crate::routes::model::RouteCryptoMetadata;

/// Marker header; any value, including an empty one, counts as present.
pub const CRYPTO_HEADER: &str = "x-crypto";

pub fn default_config() -> CryptoConfig {
    CryptoConfig::aes(CryptoDirection::Both, None)
}

pub fn resolve_crypto_config(
    metadata: Option<&RouteCryptoMetadata>,
    header_present: bool,
) -> Option<CryptoConfig> {
    match metadata {
        Some(meta) => Some(meta.to_config()),
        None if header_present => Some(default_config()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptogate_cipher::{AesOptions, CryptoMethod, MethodConfig, RsaOptions};

    fn aes() -> AesOptions {
        AesOptions {
            key: "k".repeat(16),
            iv: "i".repeat(16),
        }
    }

    #[test]
    fn nothing_configured_means_no_interception() {
        assert!(resolve_crypto_config(None, false).is_none());
    }

    #[test]
    fn header_alone_selects_default_aes_both() {
        let config = resolve_crypto_config(None, true).unwrap();
        assert_eq!(config, default_config());
        assert_eq!(config.method(), CryptoMethod::Aes);
        assert_eq!(config.direction, CryptoDirection::Both);
    }

    #[test]
    fn metadata_wins_over_header() {
        let meta = RouteCryptoMetadata::new(CryptoMethod::Rsa, CryptoDirection::Encrypt);
        for header in [false, true] {
            let config = resolve_crypto_config(Some(&meta), header).unwrap();
            assert_eq!(config.method(), CryptoMethod::Rsa);
            assert_eq!(config.direction, CryptoDirection::Encrypt);
        }
    }

    #[test]
    fn only_the_matching_option_branch_is_taken() {
        let rsa = RsaOptions {
            public_key: Some("pub".into()),
            private_key: None,
        };
        let meta = RouteCryptoMetadata::new(CryptoMethod::Rsa, CryptoDirection::Both)
            .with_aes(aes())
            .with_rsa(rsa.clone());
        assert_eq!(
            resolve_crypto_config(Some(&meta), false).unwrap().method,
            MethodConfig::Rsa(Some(rsa))
        );

        let meta = RouteCryptoMetadata::new(CryptoMethod::Aes, CryptoDirection::Both)
            .with_rsa(RsaOptions::default());
        assert_eq!(
            resolve_crypto_config(Some(&meta), false).unwrap().method,
            MethodConfig::Aes(None)
        );
    }
}
