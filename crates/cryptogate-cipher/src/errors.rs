use cryptogate_errors::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct CryptoError(pub Box<ErrorObj>);

impl CryptoError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code
    }

    pub fn dev_message(&self) -> Option<&str> {
        self.0.message_dev.as_deref()
    }

    pub fn decrypt(msg: &str) -> Self {
        Self::from_builder(ErrorBuilder::new(codes::CRYPTO_DECRYPT).dev_msg(msg))
    }

    pub fn encrypt(msg: &str) -> Self {
        Self::from_builder(ErrorBuilder::new(codes::CRYPTO_ENCRYPT).dev_msg(msg))
    }

    pub fn serialization(msg: &str) -> Self {
        Self::from_builder(ErrorBuilder::new(codes::CRYPTO_SERIALIZATION).dev_msg(msg))
    }

    pub fn options(msg: &str) -> Self {
        Self::from_builder(ErrorBuilder::new(codes::CRYPTO_OPTIONS).dev_msg(msg))
    }

    fn from_builder(builder: ErrorBuilder) -> Self {
        CryptoError(Box::new(builder.build()))
    }
}

impl From<ErrorObj> for CryptoError {
    fn from(value: ErrorObj) -> Self {
        CryptoError(Box::new(value))
    }
}
