//! # Domain Types
//!
//! Core domain types used throughout Fidelidade POS.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    StockItem    │   │   CreditEntry   │       │
//! │  │  (vendas)       │   │  (estoque)      │   │  (fiado)        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  product (key)  │   │  id (i64)       │       │
//! │  │  product        │   │  quantity       │   │  customer/phone │       │
//! │  │  amount_cents   │   │  unit_price     │   │  amount_cents   │       │
//! │  │  append-only    │   │  upserted       │   │  paid flag      │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                        │ grouped        │
//! │                                                        ▼                │
//! │  ┌─────────────────┐                         ┌─────────────────┐       │
//! │  │     Summary     │                         │ AccountSummary  │       │
//! │  │  dashboard      │                         │ total_due + ids │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored rows (`Sale`, `StockItem`, `CreditEntry`) keep money as raw cents so
//! they map 1:1 onto columns; `New*` inputs carry validated [`Money`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Surrogate key of a row in `vendas`.
pub type SaleId = i64;

/// Surrogate key of a row in `fiado`.
pub type CreditEntryId = i64;

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: SaleId,
    pub product: String,
    pub quantity: i64,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// A validated sale, ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub product: String,
    pub quantity: i64,
    pub amount: Money,
}

// =============================================================================
// Stock
// =============================================================================

/// Current stock level and price of one product.
///
/// The product name is the key: at most one row per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockItem {
    pub product: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl StockItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// A validated stock row, replacing whatever was stored for `product`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockItem {
    pub product: String,
    pub quantity: i64,
    pub unit_price: Money,
}

// =============================================================================
// Credit ("fiado")
// =============================================================================

/// One purchase taken on store credit.
///
/// Belongs to the account identified by `(customer, phone)`. Only the
/// `paid` flag ever changes after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CreditEntry {
    pub id: CreditEntryId,
    pub customer: String,
    pub phone: Option<String>,
    pub product: String,
    pub quantity: i64,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub paid: bool,
}

impl CreditEntry {
    /// Returns the entry amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the account key this entry belongs to.
    pub fn account_key(&self) -> AccountKey<'_> {
        AccountKey {
            customer: &self.customer,
            phone: self.phone.as_deref(),
        }
    }
}

/// A validated credit purchase, registered as unpaid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCreditEntry {
    pub customer: String,
    pub phone: Option<String>,
    pub product: String,
    pub quantity: i64,
    pub amount: Money,
}

/// Borrowed `(customer, phone)` pair identifying a credit account.
///
/// Ordering is customer first, then phone with "no phone" before any phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountKey<'a> {
    pub customer: &'a str,
    pub phone: Option<&'a str>,
}

/// Outstanding balance of one `(customer, phone)` account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub customer: String,
    pub phone: Option<String>,
    pub total_due: Money,
    /// Ids of the unpaid entries folded into `total_due`.
    pub entry_ids: BTreeSet<CreditEntryId>,
}

impl AccountSummary {
    /// Returns the account key.
    pub fn key(&self) -> AccountKey<'_> {
        AccountKey {
            customer: &self.customer,
            phone: self.phone.as_deref(),
        }
    }

    /// Lowest entry id, used as the last ordering tie-break.
    pub fn first_entry_id(&self) -> Option<CreditEntryId> {
        self.entry_ids.iter().next().copied()
    }

    /// Number of open entries in the account.
    pub fn entry_count(&self) -> usize {
        self.entry_ids.len()
    }
}

// =============================================================================
// Dashboard Summary
// =============================================================================

/// Product and time of the most recent sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSale {
    pub product: String,
    pub sold_at: DateTime<Utc>,
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of quantities across all stock rows.
    pub total_stock_quantity: i64,
    /// Sum of all recorded sale amounts.
    pub total_sales: Money,
    /// Number of unpaid credit entries (not accounts).
    pub open_credit_count: i64,
    /// Sum of unpaid credit amounts.
    pub open_credit_total: Money,
    pub last_sale: Option<LastSale>,
}

impl Summary {
    /// True when nothing has ever been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_stock_quantity == 0
            && self.total_sales.is_zero()
            && self.open_credit_count == 0
            && self.last_sale.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_default_is_empty() {
        let summary = Summary::default();
        assert!(summary.is_empty());
        assert_eq!(summary.total_sales, Money::zero());
        assert!(summary.last_sale.is_none());
    }

    #[test]
    fn test_account_key_ordering_puts_missing_phone_first() {
        let no_phone = AccountKey {
            customer: "Ana",
            phone: None,
        };
        let with_phone = AccountKey {
            customer: "Ana",
            phone: Some("111"),
        };
        let other = AccountKey {
            customer: "Bruno",
            phone: None,
        };

        assert!(no_phone < with_phone);
        assert!(with_phone < other);
    }

    #[test]
    fn test_account_summary_helpers() {
        let account = AccountSummary {
            customer: "Ana".to_string(),
            phone: Some("111".to_string()),
            total_due: Money::from_cents(1500),
            entry_ids: [7, 3].into_iter().collect(),
        };

        assert_eq!(account.first_entry_id(), Some(3));
        assert_eq!(account.entry_count(), 2);
        assert_eq!(account.key().phone, Some("111"));
    }
}
