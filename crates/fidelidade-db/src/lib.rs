//! # fidelidade-db: Database Layer for Fidelidade POS
//!
//! SQLite storage for the shop ledger, accessed asynchronously through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fidelidade POS Data Flow                            │
//! │                                                                         │
//! │  CLI command (credit settle --customer Ana)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  fidelidade-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ StockRepo     │    │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │ _schema.sql  │  │   │
//! │  │   │ Transactions  │    │ CreditRepo    │    │              │  │   │
//! │  │   │               │    │ SummaryRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite file: vendas • estoque • fiado                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (stock, sale, credit, summary)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fidelidade_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("fidelidade.db")).await?;
//!
//! let accounts = db.credits().list_open_accounts().await?;
//! for account in &accounts {
//!     println!("{} owes {}", account.customer, account.total_due);
//! }
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::credit::CreditRepository;
pub use repository::sale::SaleRepository;
pub use repository::stock::StockRepository;
pub use repository::summary::SummaryRepository;
