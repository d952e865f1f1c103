//! # Repository Module
//!
//! Database repository implementations for Fidelidade POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Tables                              │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.credits().list_open_accounts()                             │
//! │       ▼                                                                 │
//! │  StockRepository    ──► estoque   upsert / get / list / count          │
//! │  SaleRepository     ──► vendas    record / get_by_id / list_recent     │
//! │  CreditRepository   ──► fiado     register / list_open_accounts        │
//! │                                   settle                               │
//! │  SummaryRepository  ──► all three compute (read only)                  │
//! │                                                                         │
//! │  Every mutation commits in its own transaction.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) and columns are
//! aliased to the field names of the core types.

pub mod credit;
pub mod sale;
pub mod stock;
pub mod summary;
