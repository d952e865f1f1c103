//! # Fidelidade CLI Library
//!
//! Command-line front end for Fidelidade POS. `main.rs` only calls [`run`];
//! everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! fidelidade_cli/
//! ├── lib.rs          ◄─── You are here (startup, logging, exit codes)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig (flags, env, defaults)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch + text/JSON output
//! │   ├── summary.rs  ◄─── dashboard
//! │   ├── sale.rs     ◄─── sale record / list
//! │   ├── stock.rs    ◄─── stock set / list
//! │   └── credit.rs   ◄─── credit add / list / settle
//! └── error.rs        ◄─── ApiError for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize logging (stderr; stdout is reserved for output)         │
//! │  3. Resolve config: --db flag > FIDELIDADE_DB_PATH > data directory     │
//! │  4. Open database & run migrations                                     │
//! │  5. Run one command                                                    │
//! │  6. Close the pool, whatever the command returned                      │
//! │  7. Print output or `Error [CODE]: message`, set the exit code         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;
use error::ApiError;
use fidelidade_db::{Database, DbConfig};

/// Filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "info,fidelidade=debug,sqlx=warn";

/// Parses arguments, runs one command and reports the outcome.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err, json);
            ExitCode::FAILURE
        }
    }
}

/// Opens the database, runs the command and closes the pool on every path.
pub async fn execute(cli: Cli) -> Result<String, ApiError> {
    let config = AppConfig::from_env().with_database_path(cli.db);
    let path = config.resolve_database_path()?;

    info!(path = %path.display(), "Opening ledger");
    let db = Database::new(DbConfig::new(path)).await?;

    let result = commands::dispatch(&db, &config, cli.command, cli.json).await;

    db.close().await;
    debug!(ok = result.is_ok(), "Command finished");

    result
}

fn report(err: &ApiError, json: bool) {
    if json {
        match serde_json::to_string_pretty(err) {
            Ok(body) => eprintln!("{body}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        eprintln!("{err}");
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: warnings only
/// - `--verbose`: `info,fidelidade=debug,sqlx=warn`
/// - `RUST_LOG` overrides both
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_creates_database_file() {
        let path = std::env::temp_dir().join(format!("fidelidade-cli-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let db_arg = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["fidelidade", "--db", db_arg.as_str(), "summary"]).unwrap();
        let output = execute(cli).await.unwrap();

        assert!(output.contains("Stock on hand: 0 units"));
        assert!(path.exists());

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{db_arg}{suffix}"));
        }
    }
}
