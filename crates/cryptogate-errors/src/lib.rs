//! Stable error codes and the error object shared by the cryptogate crates.

pub mod class;
pub mod code;
pub mod model;
pub mod prelude;
pub mod render;
