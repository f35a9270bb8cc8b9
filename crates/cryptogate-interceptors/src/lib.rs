pub mod adapters;
pub mod context;
pub mod envelope;
pub mod errors;
pub mod gate;
pub mod prelude;
pub mod resolver;
pub mod routes;
pub mod stages;

pub use gate::CryptoGate;
pub use stages::{InterceptorChain, Stage, StageOutcome};
