//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing REAL columns:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A customer's tab is the sum of many small entries, so the error       │
//! │  accumulates exactly where it hurts.                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.00" + "5.00" = 1000 + 500 = 1500 cents = R$ 15.00               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fidelidade_core::money::Money;
//!
//! // Parse what the cashier typed
//! let price: Money = "2.50".parse().unwrap();
//! assert_eq!(price.cents(), 250);
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_string(), "R$ 7.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic stays closed; validation rejects negatives
///   at the form boundary, not here
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serialized as the plain cent count
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  StockItem.unit_price ─────────────► shown in `stock list`              │
/// │                                                                         │
/// │  Sale.amount ──► Σ ──► Summary.total_sales                              │
/// │                                                                         │
/// │  CreditEntry.amount ──► Σ per (customer, phone) ──► AccountSummary      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use fidelidade_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, returning `None` if the total does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use fidelidade_core::money::Money;
    ///
    /// let tab = [Money::from_cents(1000), Money::from_cents(500)];
    /// assert_eq!(Money::checked_sum(tab), Some(Money::from_cents(1500)));
    /// assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Parses a decimal amount such as `"10"`, `"10.5"` or `"10.50"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - `.` is the only decimal separator
    /// - At most two decimal places (no silent rounding of cents)
    /// - A leading `-` is accepted here; sign rules belong to validation
    ///
    /// ## Example
    /// ```rust
    /// use fidelidade_core::money::{Money, ParseMoneyError};
    ///
    /// assert_eq!(Money::parse_decimal(" 2.5 ").unwrap().cents(), 250);
    /// assert_eq!(Money::parse_decimal("1.999"), Err(ParseMoneyError::TooManyDecimals));
    /// assert_eq!(Money::parse_decimal("abc"), Err(ParseMoneyError::NotANumber));
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ParseMoneyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(ParseMoneyError::NotANumber);
        }

        if frac.len() > 2 {
            return Err(ParseMoneyError::TooManyDecimals);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };

        // "5" means fifty cents, "05" five cents
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseMoneyError::NotANumber)? * 10,
            _ => frac.parse().map_err(|_| ParseMoneyError::NotANumber)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Why a decimal amount could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a number")]
    NotANumber,

    #[error("amount has more than two decimal places")]
    TooManyDecimals,

    #[error("amount is too large")]
    Overflow,
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `R$ 10.99` (or `-R$ 5.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{} {}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.major().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
