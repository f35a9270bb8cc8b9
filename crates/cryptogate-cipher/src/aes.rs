//! AES-CBC with PKCS#7 padding. Key size selects AES-128/192/256.

use openssl::symm::{self, Cipher};

use crate::errors::CryptoError;
use crate::model::AesOptions;

pub const IV_LEN: usize = 16;

fn cipher_for(options: &AesOptions) -> Result<Cipher, CryptoError> {
    let cipher = match options.key.len() {
        16 => Cipher::aes_128_cbc(),
        24 => Cipher::aes_192_cbc(),
        32 => Cipher::aes_256_cbc(),
        other => {
            return Err(CryptoError::options(&format!(
                "AES key must be 16, 24 or 32 bytes, got {other}"
            )))
        }
    };
    if options.iv.len() != IV_LEN {
        return Err(CryptoError::options(&format!(
            "AES IV must be {IV_LEN} bytes, got {}",
            options.iv.len()
        )));
    }
    Ok(cipher)
}

/// Checks key and IV sizes without touching any data.
pub fn validate(options: &AesOptions) -> Result<(), CryptoError> {
    cipher_for(options).map(|_| ())
}

pub fn seal(options: &AesOptions, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(options)?;
    symm::encrypt(
        cipher,
        options.key.as_bytes(),
        Some(options.iv.as_bytes()),
        plaintext,
    )
    .map_err(|err| CryptoError::encrypt(&format!("aes-cbc seal failed: {err}")))
}

pub fn open(options: &AesOptions, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(options)?;
    symm::decrypt(
        cipher,
        options.key.as_bytes(),
        Some(options.iv.as_bytes()),
        ciphertext,
    )
    .map_err(|err| CryptoError::decrypt(&format!("aes-cbc open failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptogate_errors::prelude::codes;

    fn options(key: &str) -> AesOptions {
        AesOptions {
            key: key.into(),
            iv: "0000000000000000".into(),
        }
    }

    #[test]
    fn roundtrip_for_every_key_size() {
        for key in [
            "k".repeat(16),
            "k".repeat(24),
            "k".repeat(32),
        ] {
            let opts = options(&key);
            let sealed = seal(&opts, b"{\"a\":1}").unwrap();
            assert_eq!(sealed.len() % 16, 0);
            assert_eq!(open(&opts, &sealed).unwrap(), b"{\"a\":1}");
        }
    }

    #[test]
    fn rejects_bad_key_and_iv_sizes() {
        let err = seal(&options("short"), b"x").unwrap_err();
        assert_eq!(err.code(), codes::CRYPTO_OPTIONS);

        let bad_iv = AesOptions {
            key: "k".repeat(16),
            iv: "tiny".into(),
        };
        assert_eq!(validate(&bad_iv).unwrap_err().code(), codes::CRYPTO_OPTIONS);
    }

    #[test]
    fn wrong_key_fails_to_open() {
        let sealed = seal(&options(&"a".repeat(16)), b"payload-data").unwrap();
        let err = open(&options(&"b".repeat(16)), &sealed).unwrap_err();
        assert_eq!(err.code(), codes::CRYPTO_DECRYPT);
    }
}
