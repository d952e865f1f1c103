//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Fidelidade POS                         │
//! │                                                                         │
//! │  $ fidelidade credit add --customer Ana --amount abc ...               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<View, ApiError>                                          │  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ── ValidationError::InvalidNumber ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │  Account lookup?  ─── CoreError::AmbiguousAccount ─────┤        │  │
//! │  │         │                                              ▼        │  │
//! │  │  Database Error?  ─── DbError::Busy("...") ──────► ApiError ───►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr:  Error [VALIDATION_ERROR]: amount must be a number, got 'abc' │
//! │  exit code 1, store unchanged                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details are logged and replaced with a short message; the
//! cashier can't act on SQLite error text.

use std::fmt;

use serde::Serialize;

use crate::config::ConfigError;
use fidelidade_core::{CoreError, ValidationError};
use fidelidade_db::DbError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` this is what lands on stderr:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "No open account for Ana (111)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No matching record or account
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed; nothing was written
    DatabaseError,

    /// Request is valid but can't be carried out as asked
    BusinessLogic,

    /// Unexpected failure (configuration, serialization)
    Internal,
}

impl ErrorCode {
    /// The code as printed in `Error [CODE]: ...`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// Errors that clear on their own (lock contention, pool exhaustion) get a
/// "try again" hint; the rest need someone to look at the store.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let retryable = err.is_retryable();

        let api = match err {
            DbError::NotFound { entity, id } => return ApiError::not_found(&entity, &id),
            DbError::Ledger(e) => return ApiError::from(e),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not open the database")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not prepare the database")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(
                    ErrorCode::DatabaseError,
                    "Database transaction failed; nothing was saved",
                )
            }
            DbError::Busy(e) => {
                tracing::warn!("Database busy: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database is in use by another program")
            }
            DbError::PoolExhausted => ApiError::new(ErrorCode::DatabaseError, "Database is busy"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        };

        if retryable {
            ApiError::new(api.code, format!("{}; try again", api.message))
        } else {
            api
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AccountNotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::AmbiguousAccount { customer, phones } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!(
                    "Several open accounts for {customer} (phones: {}); pass --phone or --no-phone",
                    phones.join(", ")
                ),
            ),
            CoreError::TotalOverflow => ApiError::new(ErrorCode::BusinessLogic, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error [{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let err = ApiError::validation("amount is required");
        assert_eq!(err.to_string(), "Error [VALIDATION_ERROR]: amount is required");
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err = ApiError::from(ValidationError::required("customer"));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "customer is required");

        let wrapped = ApiError::from(CoreError::Validation(ValidationError::required("product")));
        assert_eq!(wrapped.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_account_errors() {
        let missing = ApiError::from(CoreError::AccountNotFound {
            customer: "Ana".to_string(),
            phone: Some("111".to_string()),
        });
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert!(missing.message.contains("Ana (111)"));

        let ambiguous = ApiError::from(CoreError::AmbiguousAccount {
            customer: "Ana".to_string(),
            phones: vec!["111".to_string(), "222".to_string()],
        });
        assert_eq!(ambiguous.code, ErrorCode::BusinessLogic);
        assert_eq!(
            ambiguous.message,
            "Several open accounts for Ana (phones: 111, 222); pass --phone or --no-phone"
        );
    }

    #[test]
    fn test_ledger_errors_keep_their_meaning() {
        let err = ApiError::from(DbError::Ledger(CoreError::TotalOverflow));
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, "Open credit total is too large to compute");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = ApiError::from(DbError::QueryFailed("CHECK constraint failed: fiado".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("CHECK"));

        let busy = ApiError::from(DbError::Busy("database is locked".to_string()));
        assert_eq!(busy.message, "Database is in use by another program; try again");
        assert!(ApiError::from(DbError::PoolExhausted).message.ends_with("try again"));
        assert!(!err.message.contains("try again"));
    }

    #[test]
    fn test_serializes_code_in_screaming_case() {
        let err = ApiError::not_found("Sale", "7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Sale not found: 7");
    }
}
