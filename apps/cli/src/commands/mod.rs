//! # Commands Module
//!
//! One function per ledger operation. Each takes the database handle and
//! raw input, and returns a view that renders as text or JSON.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch, output, shared formatting)
//! ├── summary.rs  ◄─── Dashboard
//! ├── sale.rs     ◄─── Record and list sales
//! ├── stock.rs    ◄─── Set and list stock
//! └── credit.rs   ◄─── Register, list and settle fiado
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cli (clap)                                                             │
//! │     │  Command::Credit(Settle { customer: "Ana", phone: "111" })       │
//! │     ▼                                                                   │
//! │  dispatch(&db, &config, command)                                        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  credit::settle(&db, target) -> Result<SettledView, ApiError>           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  output(view, json) -> text on stdout, or pretty JSON with --json      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod credit;
pub mod sale;
pub mod stock;
pub mod summary;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::cli::{Command, CreditCommand, SaleCommand, StockCommand};
use crate::config::AppConfig;
use crate::error::ApiError;
use fidelidade_db::Database;

/// Something a command returns: serializable for `--json`, printable otherwise.
pub trait View: Serialize {
    /// Human-readable rendering, without a trailing newline.
    fn render(&self) -> String;
}

/// Formats a view for stdout.
pub fn output<V: View>(view: &V, json: bool) -> Result<String, ApiError> {
    if json {
        serde_json::to_string_pretty(view)
            .map_err(|e| ApiError::internal(format!("Could not serialize output: {e}")))
    } else {
        Ok(view.render())
    }
}

/// Runs one parsed command against the database.
pub async fn dispatch(
    db: &Database,
    config: &AppConfig,
    command: Command,
    json: bool,
) -> Result<String, ApiError> {
    match command {
        Command::Summary => output(&summary::show(db, config).await?, json),

        Command::Sale(group) => match group.command {
            SaleCommand::Record(args) => output(&sale::record(db, args.into_form()).await?, json),
            SaleCommand::List { limit } => output(&sale::list(db, limit).await?, json),
        },

        Command::Stock(group) => match group.command {
            StockCommand::Set(args) => output(&stock::set(db, args.into_form()).await?, json),
            StockCommand::List => output(&stock::list(db).await?, json),
        },

        Command::Credit(group) => match group.command {
            CreditCommand::Add(args) => output(&credit::add(db, args.into_form()).await?, json),
            CreditCommand::List => output(&credit::list(db).await?, json),
            CreditCommand::Settle(args) => {
                output(&credit::settle(db, args.into_target()).await?, json)
            }
        },
    }
}

// ===== Shared formatting =====

/// Stored timestamps are UTC; the cashier reads local time.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

/// Phone as shown in listings.
pub(crate) fn phone_label(phone: Option<&str>) -> &str {
    phone.unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use fidelidade_db::DbConfig;

    async fn run(db: &Database, args: &[&str]) -> Result<String, ApiError> {
        let mut argv = vec!["fidelidade"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        dispatch(db, &AppConfig::default(), cli.command, cli.json).await
    }

    #[tokio::test]
    async fn test_dispatch_end_to_end() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        run(&db, &["stock", "set", "--product", "Rice", "--quantity", "10", "--price", "2.50"])
            .await
            .unwrap();
        run(&db, &["sale", "record", "--product", "Bread", "--quantity", "2", "--amount", "10"])
            .await
            .unwrap();
        run(
            &db,
            &[
                "credit", "add", "--customer", "Ana", "--phone", "111", "--product", "Milk",
                "--quantity", "1", "--amount", "5",
            ],
        )
        .await
        .unwrap();

        let json = run(&db, &["--json", "summary"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_stock_quantity"], 10);
        assert_eq!(value["total_sales"], 1000);
        assert_eq!(value["open_credit_count"], 1);

        let settled = run(&db, &["credit", "settle", "--customer", "Ana"]).await.unwrap();
        assert!(settled.contains("marked as paid"));

        let listing = run(&db, &["credit", "list"]).await.unwrap();
        assert_eq!(listing, "No pending debts");
    }

    #[tokio::test]
    async fn test_dispatch_reports_validation_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = run(&db, &["sale", "record", "--product", "Bread", "--quantity", "2", "--amount", "abc"])
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[test]
    fn test_phone_label() {
        assert_eq!(phone_label(None), "-");
        assert_eq!(phone_label(Some("111")), "111");
    }
}
