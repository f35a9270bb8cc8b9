#[cfg(feature = "with-axum")]
pub use crate::adapters::http::{crypto_middleware, handle_with_chain, AxumReq, AxumRes, RecordedError};
pub use crate::context::{InterceptContext, Payload, ProtoRequest, ProtoResponse};
pub use crate::envelope::{is_envelope, ApiRes, RESPONSE_SUCCESS_CODE, RESPONSE_SUCCESS_MSG};
pub use crate::errors::{to_http_response, InterceptError};
pub use crate::gate::CryptoGate;
pub use crate::resolver::{default_config, resolve_crypto_config, CRYPTO_HEADER};
pub use crate::routes::model::{MatchCond, RouteCryptoMetadata, RouteCryptoOptions, RouteCryptoSpec};
pub use crate::routes::table::RouteCryptoTable;
pub use crate::stages::context_init::ContextInitStage;
pub use crate::stages::crypto_resolve::ResolveCryptoStage;
pub use crate::stages::decrypt_request::DecryptRequestStage;
pub use crate::stages::encrypt_response::EncryptResponseStage;
pub use crate::stages::{InterceptorChain, Stage, StageOutcome};
