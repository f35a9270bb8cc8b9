mod app;
mod commands;
mod dispatch;
mod env;
mod seal;
mod serve;

pub use app::run;
pub use commands::Commands;
pub use env::CliArgs;
pub use seal::{cmd_open, cmd_seal, open_text, seal_text, SealArgs};
pub use serve::{cmd_serve, ServeArgs};
