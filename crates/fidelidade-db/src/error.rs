//! # Database Error Types
//!
//! Error types for database operations. `DbError` is what the rest of the
//! system calls a storage error: the operation had no effect and may be
//! retried.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← code + message                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cashier sees a short message; details go to the log                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fidelidade_core::CoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (read-only medium, missing directory)
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema creation failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (constraint violation, disk full, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit failed; nothing was written.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Another connection holds the write lock (SQLITE_BUSY / SQLITE_LOCKED).
    #[error("Database is busy: {0}")]
    Busy(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Stored rows broke a ledger rule while being folded (e.g. an
    /// account total that no longer fits).
    #[error("Ledger error: {0}")]
    Ledger(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps a failure to begin or commit a transaction.
    pub fn transaction(err: sqlx::Error) -> Self {
        match DbError::from(err) {
            DbError::Busy(msg) => DbError::Busy(msg),
            other => DbError::TransactionFailed(other.to_string()),
        }
    }

    /// Whether retrying the same operation may succeed.
    ///
    /// Lock contention and pool exhaustion clear on their own; the rest
    /// need someone to look at the disk or the schema.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::Busy(_) | DbError::PoolExhausted)
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Busy for lock codes, QueryFailed otherwise
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                // SQLite primary codes: 5 = SQLITE_BUSY, 6 = SQLITE_LOCKED.
                // Extended codes keep the primary code in the low byte.
                let locked = db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .map(|code| matches!(code & 0xff, 5 | 6))
                    .unwrap_or(false);

                if locked || msg.contains("database is locked") {
                    DbError::Busy(msg)
                } else {
                    DbError::QueryFailed(msg)
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(DbError::Busy("database is locked".to_string()).is_retryable());
        assert!(DbError::PoolExhausted.is_retryable());
        assert!(!DbError::QueryFailed("CHECK constraint failed".to_string()).is_retryable());
        assert!(!DbError::MigrationFailed("bad sql".to_string()).is_retryable());
    }

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::transaction(sqlx::Error::PoolClosed),
            DbError::TransactionFailed(_)
        ));
    }

    #[test]
    fn test_ledger_errors_are_wrapped() {
        let err = DbError::from(CoreError::TotalOverflow);
        assert!(matches!(err, DbError::Ledger(CoreError::TotalOverflow)));
        assert!(!err.is_retryable());
    }
}
