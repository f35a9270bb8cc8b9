//! cryptogate: per-route request decryption and response encryption for axum
//! services, plus the settings, logging and CLI needed to run it.

pub mod cli;
pub mod config;
pub mod logging;
pub mod server;

pub use config::{load_settings, LoadedSettings, Settings, SettingsError};
pub use cryptogate_cipher as cipher;
pub use cryptogate_errors as errors;
pub use cryptogate_interceptors as interceptors;
