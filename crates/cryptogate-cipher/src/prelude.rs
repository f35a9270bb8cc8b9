pub use crate::canonical::canonical_json_string;
pub use crate::engine::{CipherEngine, EngineDefaults, OpensslCipherEngine};
pub use crate::errors::CryptoError;
pub use crate::metrics::{CryptoMetrics, CryptoMetricsSnapshot};
pub use crate::model::{
    should_decrypt, should_encrypt, AesOptions, CryptoConfig, CryptoDirection, CryptoMethod,
    MethodConfig, RsaOptions,
};
