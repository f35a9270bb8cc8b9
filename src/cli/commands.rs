use clap::Subcommand;

use super::seal::SealArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run the demo API behind the crypto middleware
    Serve(ServeArgs),

    /// Encrypt a JSON value the way a client of ROUTE would
    Seal(SealArgs),

    /// Decrypt a ciphertext (or an envelope with encrypted data) for ROUTE
    Open(SealArgs),
}
