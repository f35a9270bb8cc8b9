//! RSA-OAEP over PEM keys. Plaintext is split into OAEP-sized blocks and the
//! resulting ciphertext blocks are concatenated.

use openssl::pkey::{Private, Public};
use openssl::rsa::{Padding, Rsa};

use crate::errors::CryptoError;
use crate::model::RsaOptions;

/// OAEP with SHA-1 consumes 2 * 20 + 2 bytes of every block.
const OAEP_OVERHEAD: usize = 42;

fn public_key(options: &RsaOptions) -> Result<Rsa<Public>, CryptoError> {
    let pem = options
        .public_key
        .as_deref()
        .ok_or_else(|| CryptoError::options("RSA public key is not configured"))?;
    let parsed = if pem.contains("BEGIN RSA PUBLIC KEY") {
        Rsa::public_key_from_pem_pkcs1(pem.as_bytes())
    } else {
        Rsa::public_key_from_pem(pem.as_bytes())
    };
    parsed.map_err(|err| CryptoError::options(&format!("invalid RSA public key: {err}")))
}

fn private_key(options: &RsaOptions) -> Result<Rsa<Private>, CryptoError> {
    let pem = options
        .private_key
        .as_deref()
        .ok_or_else(|| CryptoError::options("RSA private key is not configured"))?;
    Rsa::private_key_from_pem(pem.as_bytes())
        .map_err(|err| CryptoError::options(&format!("invalid RSA private key: {err}")))
}

/// Parses whichever keys are present.
pub fn validate(options: &RsaOptions) -> Result<(), CryptoError> {
    if options.public_key.is_some() {
        public_key(options)?;
    }
    if options.private_key.is_some() {
        private_key(options)?;
    }
    Ok(())
}

pub fn seal(options: &RsaOptions, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let rsa = public_key(options)?;
    let block = rsa.size() as usize;
    let chunk = block
        .checked_sub(OAEP_OVERHEAD)
        .filter(|len| *len > 0)
        .ok_or_else(|| CryptoError::options("RSA modulus too small for OAEP"))?;

    let mut buf = vec![0u8; block];
    let mut out = Vec::with_capacity(plaintext.len().div_ceil(chunk).max(1) * block);
    let mut seal_piece = |piece: &[u8], out: &mut Vec<u8>| -> Result<(), CryptoError> {
        let written = rsa
            .public_encrypt(piece, &mut buf, Padding::PKCS1_OAEP)
            .map_err(|err| CryptoError::encrypt(&format!("rsa-oaep seal failed: {err}")))?;
        out.extend_from_slice(&buf[..written]);
        Ok(())
    };

    if plaintext.is_empty() {
        seal_piece(plaintext, &mut out)?;
    }
    for piece in plaintext.chunks(chunk) {
        seal_piece(piece, &mut out)?;
    }
    Ok(out)
}

pub fn open(options: &RsaOptions, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let rsa = private_key(options)?;
    let block = rsa.size() as usize;
    if ciphertext.is_empty() || ciphertext.len() % block != 0 {
        return Err(CryptoError::decrypt(&format!(
            "ciphertext length {} is not a multiple of the {block}-byte RSA block",
            ciphertext.len()
        )));
    }

    let mut buf = vec![0u8; block];
    let mut out = Vec::with_capacity(ciphertext.len());
    for piece in ciphertext.chunks(block) {
        let written = rsa
            .private_decrypt(piece, &mut buf, Padding::PKCS1_OAEP)
            .map_err(|err| CryptoError::decrypt(&format!("rsa-oaep open failed: {err}")))?;
        out.extend_from_slice(&buf[..written]);
    }
    Ok(out)
}
