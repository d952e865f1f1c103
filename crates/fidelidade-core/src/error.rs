//! # Error Types
//!
//! Domain-specific error types for fidelidade-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fidelidade-core errors (this file)                                    │
//! │  ├── CoreError        - Account resolution and total overflow          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  fidelidade-db errors (separate crate)                                 │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the cashier sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No open credit account matches the requested customer.
    ///
    /// ## When This Occurs
    /// - Customer has never bought on credit
    /// - All of the customer's debts were already settled
    #[error("No open account for {customer}{}", phone_suffix(.phone))]
    AccountNotFound {
        customer: String,
        phone: Option<String>,
    },

    /// Several open accounts share the customer name and no phone was given.
    ///
    /// ## User Workflow
    /// ```text
    /// credit settle --customer Ana
    ///      │
    ///      ▼
    /// Open accounts: (Ana, 111), (Ana, 222)
    ///      │
    ///      ▼
    /// AmbiguousAccount { customer: "Ana", phones: ["111", "222"] }
    ///      │
    ///      ▼
    /// CLI shows: "pass --phone or --no-phone"
    /// ```
    #[error("Several open accounts for {customer} (phones: {}); specify the phone", .phones.join(", "))]
    AmbiguousAccount {
        customer: String,
        phones: Vec<String>,
    },

    /// Open credit adds up past what `Money` can hold.
    ///
    /// Form limits keep new entries far from this; it only shows up when
    /// rows were written around them.
    #[error("Open credit total is too large to compute")]
    TotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn phone_suffix(phone: &Option<String>) -> String {
    match phone {
        Some(phone) => format!(" ({phone})"),
        None => String::new(),
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a submitted form doesn't meet requirements.
/// The cashier corrects the field and submits again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field does not parse as a number.
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., too many decimal places, malformed id list).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidNumber error for the given field and raw value.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AccountNotFound {
            customer: "Ana".to_string(),
            phone: Some("111".to_string()),
        };
        assert_eq!(err.to_string(), "No open account for Ana (111)");

        let err = CoreError::AccountNotFound {
            customer: "Ana".to_string(),
            phone: None,
        };
        assert_eq!(err.to_string(), "No open account for Ana");
    }

    #[test]
    fn test_ambiguous_account_message() {
        let err = CoreError::AmbiguousAccount {
            customer: "Ana".to_string(),
            phones: vec!["111".to_string(), "222".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Several open accounts for Ana (phones: 111, 222); specify the phone"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("product").to_string(), "product is required");
        assert_eq!(
            ValidationError::invalid_number("quantity", "abc").to_string(),
            "quantity must be a number, got 'abc'"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("customer").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
