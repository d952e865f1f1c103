//! # Credit Commands
//!
//! Fiado: purchases taken on store credit, grouped into one account per
//! `(customer, phone)`.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  credit settle --customer Ana --phone 111                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_open_accounts()  ──►  [(Ana,111,{1,3}), (Ana,222,{5}), ...]      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_account(Ana, 111) ──► entry_ids {1,3}                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  settle({1,3})  ──►  one transaction, returns 2                        │
//! │                                                                         │
//! │  credit settle --customer Ana --no-phone   picks (Ana, no phone)       │
//! │  credit settle --ids 1,3   skips the lookup and settles those ids      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::info;

use super::{phone_label, View};
use crate::error::ApiError;
use fidelidade_core::forms::CreditForm;
use fidelidade_core::ledger::{find_account, PhoneChoice};
use fidelidade_core::validation::{normalize_phone, parse_entry_ids, validate_customer_name};
use fidelidade_core::{AccountSummary, CoreError, CreditEntry, Money};
use fidelidade_db::Database;

/// What `credit settle` acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleTarget {
    /// Every open entry of one account.
    Account {
        customer: String,
        phone: AccountPhone,
    },
    /// Raw comma-separated entry ids.
    Entries(String),
}

/// The phone part of [`SettleTarget::Account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountPhone {
    /// Not given; the name must be unique among open accounts.
    Unspecified,
    /// `--no-phone`: the account registered without one.
    NoPhone,
    /// `--phone`.
    Number(String),
}

/// Result of `credit add`.
#[derive(Debug, Clone, Serialize)]
pub struct CreditRegisteredView {
    pub entry: CreditEntry,
    /// What the entry's account owes after this purchase.
    pub account_total: Money,
    pub account_entries: usize,
}

/// Result of `credit list`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAccountsView {
    pub accounts: Vec<AccountSummary>,
    pub total_due: Money,
}

/// Result of `credit settle`.
#[derive(Debug, Clone, Serialize)]
pub struct SettledView {
    /// The settled account, when settling by customer.
    pub account: Option<AccountSummary>,
    pub requested: usize,
    pub settled: u64,
}

/// Validates the form and registers an unpaid entry.
pub async fn add(db: &Database, form: CreditForm) -> Result<CreditRegisteredView, ApiError> {
    let new_entry = form.validate()?;
    let credits = db.credits();

    let entry = credits.register(&new_entry).await?;

    let accounts = credits.list_open_accounts().await?;
    let (account_total, account_entries) = accounts
        .iter()
        .find(|account| account.key() == entry.account_key())
        .map(|account| (account.total_due, account.entry_count()))
        .unwrap_or((entry.amount(), 1));

    info!(
        id = entry.id,
        customer = %entry.customer,
        account_total_cents = account_total.cents(),
        "Fiado registered"
    );

    Ok(CreditRegisteredView {
        entry,
        account_total,
        account_entries,
    })
}

/// Lists open accounts. Empty when nothing is owed.
pub async fn list(db: &Database) -> Result<OpenAccountsView, ApiError> {
    let accounts = db.credits().list_open_accounts().await?;
    let total_due = Money::checked_sum(accounts.iter().map(|account| account.total_due))
        .ok_or(CoreError::TotalOverflow)?;

    Ok(OpenAccountsView {
        accounts,
        total_due,
    })
}

/// Marks entries paid, either a whole account or explicit ids.
///
/// Settling something already paid is not an error; it reports 0.
pub async fn settle(db: &Database, target: SettleTarget) -> Result<SettledView, ApiError> {
    let credits = db.credits();

    match target {
        SettleTarget::Account { customer, phone } => {
            let customer = validate_customer_name(&customer)?;
            // A blank --phone counts as not given
            let number = match &phone {
                AccountPhone::Number(raw) => normalize_phone(raw)?,
                AccountPhone::Unspecified | AccountPhone::NoPhone => None,
            };
            let choice = match phone {
                AccountPhone::NoPhone => PhoneChoice::NoPhone,
                _ => PhoneChoice::from_option(number.as_deref()),
            };

            let accounts = credits.list_open_accounts().await?;
            let account = find_account(&accounts, &customer, choice)?.clone();

            let settled = credits.settle(&account.entry_ids).await?;
            info!(customer = %account.customer, settled, "Account settled");

            Ok(SettledView {
                requested: account.entry_count(),
                account: Some(account),
                settled,
            })
        }
        SettleTarget::Entries(raw) => {
            let ids = parse_entry_ids(&raw)?;
            let settled = credits.settle(&ids).await?;

            Ok(SettledView {
                account: None,
                requested: ids.len(),
                settled,
            })
        }
    }
}

impl View for CreditRegisteredView {
    fn render(&self) -> String {
        let entry = &self.entry;
        format!(
            "Fiado registered: {} (tel {}) {} x{}, {}\n{} now owes {} across {} entries",
            entry.customer,
            phone_label(entry.phone.as_deref()),
            entry.product,
            entry.quantity,
            entry.amount(),
            entry.customer,
            self.account_total,
            self.account_entries
        )
    }
}

impl View for OpenAccountsView {
    fn render(&self) -> String {
        if self.accounts.is_empty() {
            return "No pending debts".to_string();
        }

        let mut lines = vec![format!(
            "{:<24} {:<16} {:>14}  {}",
            "Customer", "Phone", "Owes", "Entries"
        )];
        lines.extend(self.accounts.iter().map(|account| {
            let ids: Vec<String> = account.entry_ids.iter().map(|id| id.to_string()).collect();
            format!(
                "{:<24} {:<16} {:>14}  {}",
                account.customer,
                phone_label(account.phone.as_deref()),
                account.total_due.to_string(),
                ids.join(",")
            )
        }));
        lines.push(format!("Total owed: {}", self.total_due));
        lines.join("\n")
    }
}

impl View for SettledView {
    fn render(&self) -> String {
        if self.settled == 0 {
            return "Nothing to settle: entries already paid or not found".to_string();
        }

        match &self.account {
            Some(account) => format!(
                "Debts marked as paid: {} (tel {}), {} entries, {}",
                account.customer,
                phone_label(account.phone.as_deref()),
                self.settled,
                account.total_due
            ),
            None => format!(
                "Debts marked as paid: {} of {} entries",
                self.settled, self.requested
            ),
        }
    }
}
