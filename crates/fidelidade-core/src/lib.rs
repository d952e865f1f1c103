//! # fidelidade-core: Pure Business Logic for Fidelidade POS
//!
//! This crate holds the domain types and rules of the shop ledger as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fidelidade POS Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fidelidade CLI                               │   │
//! │  │    summary ─ sale ─ stock ─ credit (add / list / settle)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw text fields                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fidelidade-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   forms   │  │  ledger   │  │   │
//! │  │   │   Sale    │  │   Money   │  │ SaleForm  │  │ grouping  │  │   │
//! │  │   │ StockItem │  │  parsing  │  │ StockForm │  │ accounts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fidelidade-db (Database Layer)                   │   │
//! │  │         vendas • estoque • fiado  (SQLite repositories)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, StockItem, CreditEntry, Summary)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level rules and numeric parsing
//! - [`forms`] - Raw text forms turned into validated inputs
//! - [`ledger`] - Grouping of open credit entries into accounts
//!
//! ## Example Usage
//!
//! ```rust
//! use fidelidade_core::forms::CreditForm;
//!
//! let form = CreditForm {
//!     customer: "Ana".into(),
//!     phone: "111".into(),
//!     product: "Bread".into(),
//!     quantity: "2".into(),
//!     amount: "10.00".into(),
//! };
//!
//! let entry = form.validate().unwrap();
//! assert_eq!(entry.amount.cents(), 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod forms;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when rendering money.
///
/// The shop works in a single fixed unit; there is no locale handling.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a customer name.
pub const MAX_CUSTOMER_NAME_LEN: usize = 120;

/// Maximum length of a phone number as typed by the cashier.
pub const MAX_PHONE_LEN: usize = 30;

/// Largest single amount a form accepts, in cents (R$ 1,000,000,000.00).
///
/// Keeps sums of many entries far below `i64::MAX`.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;
