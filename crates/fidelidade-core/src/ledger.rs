//! # Credit Ledger
//!
//! Folds individual credit entries into per-customer accounts.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fiado rows (unpaid only)                                               │
//! │                                                                         │
//! │   id  customer  phone  product  amount                                  │
//! │   1   Ana       111    Bread    10.00  ─┐                               │
//! │   2   Bruno     -      Coffee    3.00  ─┼──┐                            │
//! │   3   Ana       111    Milk      5.00  ─┘  │                            │
//! │                                            │                            │
//! │        group by (customer, phone)          │                            │
//! │                    │                       │                            │
//! │                    ▼                       ▼                            │
//! │   AccountSummary { Ana, 111, 15.00, {1,3} }                             │
//! │   AccountSummary { Bruno, -, 3.00, {2} }                                │
//! │                                                                         │
//! │  Order: customer, then phone (none first), then lowest entry id        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The id set of an account is exactly what a "mark paid" action hands back
//! to the settlement query.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AccountSummary, CreditEntry};

/// Groups the unpaid entries by `(customer, phone)`.
///
/// Paid entries are ignored, so an account whose entries are all settled
/// does not appear. Zero-amount entries still count toward membership.
/// Fails with [`CoreError::TotalOverflow`] instead of wrapping a total.
pub fn group_open_accounts<'a, I>(entries: I) -> CoreResult<Vec<AccountSummary>>
where
    I: IntoIterator<Item = &'a CreditEntry>,
{
    let mut grouped: BTreeMap<(String, Option<String>), AccountSummary> = BTreeMap::new();

    for entry in entries.into_iter().filter(|entry| !entry.paid) {
        let account = grouped
            .entry((entry.customer.clone(), entry.phone.clone()))
            .or_insert_with(|| AccountSummary {
                customer: entry.customer.clone(),
                phone: entry.phone.clone(),
                total_due: Money::zero(),
                entry_ids: BTreeSet::new(),
            });

        account.total_due = account
            .total_due
            .checked_add(entry.amount())
            .ok_or(CoreError::TotalOverflow)?;
        account.entry_ids.insert(entry.id);
    }

    let mut accounts: Vec<AccountSummary> = grouped.into_values().collect();
    accounts.sort_by(|a, b| {
        a.key()
            .cmp(&b.key())
            .then_with(|| a.first_entry_id().cmp(&b.first_entry_id()))
    });
    Ok(accounts)
}

/// Sum of unpaid amounts.
pub fn open_balance<'a, I>(entries: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = &'a CreditEntry>,
{
    Money::checked_sum(
        entries
            .into_iter()
            .filter(|entry| !entry.paid)
            .map(CreditEntry::amount),
    )
    .ok_or(CoreError::TotalOverflow)
}

/// Which phone a "mark paid" action names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneChoice<'a> {
    /// No phone given: the name alone must identify the account.
    Unspecified,
    /// The account registered without a phone.
    NoPhone,
    /// The account with this phone.
    Number(&'a str),
}

impl<'a> PhoneChoice<'a> {
    /// `Some(phone)` picks that number, `None` leaves it open.
    pub fn from_option(phone: Option<&'a str>) -> Self {
        match phone {
            Some(phone) => PhoneChoice::Number(phone),
            None => PhoneChoice::Unspecified,
        }
    }
}

/// Picks the account a "mark paid" action refers to.
///
/// ## Rules
/// - `Number(p)`: the account with exactly `(customer, p)`
/// - `NoPhone`: the account `(customer, no phone)`, even when the name
///   also has accounts with phones
/// - `Unspecified`: the single account for `customer`; if the name has
///   several accounts the caller must say which one
pub fn find_account<'a>(
    accounts: &'a [AccountSummary],
    customer: &str,
    phone: PhoneChoice<'_>,
) -> CoreResult<&'a AccountSummary> {
    let customer = customer.trim();

    let exact = |wanted: Option<&str>| {
        accounts
            .iter()
            .find(|account| account.customer == customer && account.phone.as_deref() == wanted)
            .ok_or_else(|| CoreError::AccountNotFound {
                customer: customer.to_string(),
                phone: wanted.map(str::to_string),
            })
    };

    match phone {
        PhoneChoice::Number(number) => exact(Some(number.trim())),
        PhoneChoice::NoPhone => exact(None),
        PhoneChoice::Unspecified => {
            let matches: Vec<&AccountSummary> = accounts
                .iter()
                .filter(|account| account.customer == customer)
                .collect();

            match matches.as_slice() {
                [] => Err(CoreError::AccountNotFound {
                    customer: customer.to_string(),
                    phone: None,
                }),
                [single] => Ok(*single),
                several => Err(CoreError::AmbiguousAccount {
                    customer: customer.to_string(),
                    phones: several
                        .iter()
                        .map(|account| {
                            account
                                .phone
                                .clone()
                                .unwrap_or_else(|| "no phone".to_string())
                        })
                        .collect(),
                }),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(id: i64, customer: &str, phone: Option<&str>, cents: i64, paid: bool) -> CreditEntry {
        CreditEntry {
            id,
            customer: customer.to_string(),
            phone: phone.map(str::to_string),
            product: "Item".to_string(),
            quantity: 1,
            amount_cents: cents,
            created_at: Utc::now(),
            paid,
        }
    }

    #[test]
    fn test_groups_by_customer_and_phone() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, false),
            entry(2, "Ana", Some("111"), 500, false),
        ];

        let accounts = group_open_accounts(&entries).unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].customer, "Ana");
        assert_eq!(accounts[0].total_due, Money::from_cents(1500));
        assert_eq!(accounts[0].entry_ids, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_same_name_different_phone_are_separate_accounts() {
        let entries = vec![
            entry(1, "Ana", Some("222"), 100, false),
            entry(2, "Ana", Some("111"), 200, false),
            entry(3, "Ana", None, 300, false),
        ];

        let accounts = group_open_accounts(&entries).unwrap();
        let phones: Vec<Option<&str>> = accounts.iter().map(|a| a.phone.as_deref()).collect();

        assert_eq!(phones, vec![None, Some("111"), Some("222")]);
    }

    #[test]
    fn test_orders_by_customer_name() {
        let entries = vec![
            entry(1, "Carla", None, 100, false),
            entry(2, "Ana", None, 100, false),
            entry(3, "Bruno", None, 100, false),
        ];

        let names: Vec<String> = group_open_accounts(&entries).unwrap()
            .into_iter()
            .map(|a| a.customer)
            .collect();

        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_paid_entries_are_excluded() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, true),
            entry(2, "Bruno", None, 700, false),
        ];

        let accounts = group_open_accounts(&entries).unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].customer, "Bruno");
    }

    #[test]
    fn test_zero_amount_entries_are_counted() {
        let entries = vec![entry(4, "Ana", None, 0, false)];

        let accounts = group_open_accounts(&entries).unwrap();

        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].total_due.is_zero());
        assert_eq!(accounts[0].entry_count(), 1);
    }

    #[test]
    fn test_empty_input_gives_no_accounts() {
        let entries: Vec<CreditEntry> = Vec::new();
        assert!(group_open_accounts(&entries).unwrap().is_empty());
    }

    #[test]
    fn test_total_due_matches_open_balance() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, false),
            entry(2, "Bruno", None, 350, false),
            entry(3, "Ana", Some("111"), 500, true),
            entry(4, "Carla", Some("9"), 1, false),
            entry(5, "Bruno", None, 649, false),
        ];

        let accounts = group_open_accounts(&entries).unwrap();
        let summed: Money = accounts.iter().map(|a| a.total_due).sum();

        assert_eq!(summed, open_balance(&entries).unwrap());
        assert_eq!(summed, Money::from_cents(2000));
    }

    #[test]
    fn test_find_account_with_phone() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, false),
            entry(2, "Ana", Some("222"), 500, false),
        ];
        let accounts = group_open_accounts(&entries).unwrap();

        let account = find_account(&accounts, "Ana", PhoneChoice::Number("222")).unwrap();
        assert_eq!(account.entry_ids, BTreeSet::from([2]));
    }

    #[test]
    fn test_find_account_without_phone_requires_unique_name() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, false),
            entry(2, "Ana", Some("222"), 500, false),
            entry(3, "Bruno", Some("333"), 500, false),
        ];
        let accounts = group_open_accounts(&entries).unwrap();

        let bruno = find_account(&accounts, "Bruno", PhoneChoice::Unspecified).unwrap();
        assert_eq!(bruno.phone.as_deref(), Some("333"));

        let err = find_account(&accounts, "Ana", PhoneChoice::Unspecified).unwrap_err();
        assert!(matches!(err, CoreError::AmbiguousAccount { ref phones, .. } if phones.len() == 2));
    }

    #[test]
    fn test_find_account_without_phone_beside_phone_accounts() {
        let entries = vec![
            entry(1, "Ana", Some("111"), 1000, false),
            entry(2, "Ana", None, 500, false),
            entry(3, "Ana", None, 250, false),
        ];
        let accounts = group_open_accounts(&entries).unwrap();

        let err = find_account(&accounts, "Ana", PhoneChoice::Unspecified).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AmbiguousAccount { ref phones, .. } if phones == &["no phone", "111"]
        ));

        let account = find_account(&accounts, "Ana", PhoneChoice::NoPhone).unwrap();
        assert_eq!(account.entry_ids, BTreeSet::from([2, 3]));
        assert_eq!(account.total_due, Money::from_cents(750));

        let err = find_account(&accounts, "Bruno", PhoneChoice::NoPhone).unwrap_err();
        assert!(matches!(err, CoreError::AccountNotFound { phone: None, .. }));
    }

    #[test]
    fn test_phone_choice_from_option() {
        assert_eq!(PhoneChoice::from_option(Some("111")), PhoneChoice::Number("111"));
        assert_eq!(PhoneChoice::from_option(None), PhoneChoice::Unspecified);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let entries = vec![
            entry(1, "Ana", Some("111"), i64::MAX - 10, false),
            entry(2, "Ana", Some("111"), 20, false),
        ];

        assert!(matches!(group_open_accounts(&entries), Err(CoreError::TotalOverflow)));
        assert!(matches!(open_balance(&entries), Err(CoreError::TotalOverflow)));
    }

    #[test]
    fn test_largest_accepted_amounts_add_up() {
        let max = crate::MAX_AMOUNT_CENTS;
        let entries = vec![
            entry(1, "Ana", Some("111"), max, false),
            entry(2, "Ana", Some("111"), max, false),
        ];

        let accounts = group_open_accounts(&entries).unwrap();
        assert_eq!(accounts[0].total_due, Money::from_cents(2 * max));
    }

    #[test]
    fn test_find_account_missing() {
        let entries: Vec<CreditEntry> = Vec::new();
        let accounts = group_open_accounts(&entries).unwrap();
        let err = find_account(&accounts, "Ana", PhoneChoice::Number("111")).unwrap_err();
        assert!(matches!(err, CoreError::AccountNotFound { .. }));
    }

    #[test]
    fn test_account_summary_serializes() {
        let entries = vec![entry(1, "Ana", Some("111"), 1000, false)];
        let accounts = group_open_accounts(&entries).unwrap();

        let json = serde_json::to_value(&accounts[0]).unwrap();
        assert_eq!(json["total_due"], 1000);
        assert_eq!(json["entry_ids"], serde_json::json!([1]));
    }
}
