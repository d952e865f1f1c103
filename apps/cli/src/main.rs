//! # Fidelidade CLI Entry Point
//!
//! ```text
//! $ fidelidade credit list
//! Customer                 Phone                      Owes  Entries
//! Ana                      111                    R$ 15.00  1,3
//! Total owed: R$ 15.00
//! ```
//!
//! Setup lives in `lib.rs` for testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    fidelidade_cli::run().await
}
