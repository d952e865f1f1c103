//! # Validation Module
//!
//! Field-level rules for the text a cashier types into a form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Presence of flags only - values stay raw text                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (via forms)                                      │
//! │  ├── Blank checks, length limits                                       │
//! │  └── Numeric parsing, non-negative rule                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(produto) on estoque                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::types::CreditEntryId;
use crate::{MAX_AMOUNT_CENTS, MAX_CUSTOMER_NAME_LEN, MAX_PHONE_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and rejects it when blank or longer than `max` characters.
///
/// ## Returns
/// The trimmed value.
pub fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use fidelidade_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Bread ").unwrap(), "Bread");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    required_text("product", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    required_text("customer", name, MAX_CUSTOMER_NAME_LEN)
}

/// Normalizes an optional phone number.
///
/// A blank phone means "no phone" and becomes `None`.
pub fn normalize_phone(phone: &str) -> ValidationResult<Option<String>> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Ok(None);
    }

    if phone.chars().count() > MAX_PHONE_LEN {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_LEN,
        });
    }

    Ok(Some(phone.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a non-negative whole quantity.
///
/// ## Example
/// ```rust
/// use fidelidade_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("quantity", " 4 ").unwrap(), 4);
/// assert_eq!(parse_quantity("quantity", "0").unwrap(), 0);
/// assert!(parse_quantity("quantity", "-1").is_err());
/// assert!(parse_quantity("quantity", "2.5").is_err());
/// ```
pub fn parse_quantity(field: &str, text: &str) -> ValidationResult<i64> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    let quantity: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid_number(field, trimmed))?;

    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(quantity)
}

/// Parses a non-negative money amount. Zero is allowed, anything above
/// [`MAX_AMOUNT_CENTS`] is not.
///
/// ## Example
/// ```rust
/// use fidelidade_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("amount", "2.75").unwrap().cents(), 275);
/// assert_eq!(parse_amount("amount", "0").unwrap().cents(), 0);
/// assert!(parse_amount("amount", "-1").is_err());
/// assert!(parse_amount("amount", "1000000000.01").is_err());
/// ```
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<Money> {
    let trimmed = text.trim();

    let amount = Money::parse_decimal(trimmed).map_err(|err| match err {
        ParseMoneyError::Empty => ValidationError::required(field),
        ParseMoneyError::NotANumber => ValidationError::invalid_number(field, trimmed),
        ParseMoneyError::TooManyDecimals | ParseMoneyError::Overflow => {
            ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: err.to_string(),
            }
        }
    })?;

    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if amount.cents() > MAX_AMOUNT_CENTS {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be at most {}", Money::from_cents(MAX_AMOUNT_CENTS)),
        });
    }

    Ok(amount)
}

// =============================================================================
// Id Validators
// =============================================================================

/// Parses a comma-separated list of credit entry ids (`"3, 7,9"`).
///
/// Duplicates collapse; the result is ordered.
pub fn parse_entry_ids(text: &str) -> ValidationResult<BTreeSet<CreditEntryId>> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::required("ids"));
    }

    trimmed
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<CreditEntryId>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "ids".to_string(),
                    reason: format!("'{part}' is not a valid entry id"),
                })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Rice").unwrap(), "Rice");
        assert_eq!(
            validate_product_name("   ").unwrap_err(),
            ValidationError::required("product")
        );
        assert!(matches!(
            validate_product_name(&"A".repeat(300)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name(" Ana ").unwrap(), "Ana");
        assert!(validate_customer_name("").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("").unwrap(), None);
        assert_eq!(normalize_phone("   ").unwrap(), None);
        assert_eq!(normalize_phone(" 111 ").unwrap(), Some("111".to_string()));
        assert!(normalize_phone(&"9".repeat(40)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("quantity", "10").unwrap(), 10);
        assert_eq!(parse_quantity("quantity", "0").unwrap(), 0);

        assert_eq!(
            parse_quantity("quantity", "").unwrap_err(),
            ValidationError::required("quantity")
        );
        assert_eq!(
            parse_quantity("quantity", "two").unwrap_err(),
            ValidationError::invalid_number("quantity", "two")
        );
        assert!(matches!(
            parse_quantity("quantity", "-3"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("price", "2.50").unwrap(), Money::from_cents(250));
        assert_eq!(parse_amount("price", "0.00").unwrap(), Money::zero());

        assert_eq!(
            parse_amount("price", " ").unwrap_err(),
            ValidationError::required("price")
        );
        assert_eq!(
            parse_amount("price", "abc").unwrap_err(),
            ValidationError::invalid_number("price", "abc")
        );
        assert!(matches!(
            parse_amount("price", "1.234"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_amount("price", "-0.01"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_parse_amount_upper_limit() {
        assert_eq!(
            parse_amount("amount", "1000000000.00").unwrap().cents(),
            MAX_AMOUNT_CENTS
        );

        let err = parse_amount("amount", "1000000000.01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "amount has invalid format: must be at most R$ 1000000000.00"
        );
        assert!(matches!(
            parse_amount("amount", "90000000000000000.00"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_entry_ids() {
        let ids = parse_entry_ids("3, 7,3").unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![3, 7]);

        assert!(parse_entry_ids("").is_err());
        assert!(parse_entry_ids("1,,2").is_err());
        assert!(parse_entry_ids("1; DROP TABLE fiado").is_err());
        assert!(parse_entry_ids("0").is_err());
    }
}
