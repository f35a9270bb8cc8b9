pub mod aes;
pub mod canonical;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod prelude;
pub mod rsa;

pub use engine::{CipherEngine, EngineDefaults, OpensslCipherEngine};
pub use errors::CryptoError;
pub use metrics::{CryptoMetrics, CryptoMetricsSnapshot};
pub use model::{
    should_decrypt, should_encrypt, AesOptions, CryptoConfig, CryptoDirection, CryptoMethod,
    MethodConfig, RsaOptions,
};
