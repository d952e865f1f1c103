//! # Database Migrations
//!
//! The ledger schema (`vendas`, `estoque`, `fiado`) ships inside the binary
//! and is brought up to date whenever a [`Database`](crate::Database) opens.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql   vendas, estoque, fiado + open-account index
//!
//! open ──► _sqlx_migrations ──► apply pending files in order ──► ready
//! ```
//!
//! Files are append-only: a schema change is a new `NNN_description.sql`,
//! never an edit to one already shipped (sqlx checks the checksums).

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// sqlx's bookkeeping table.
const BOOKKEEPING_TABLE: &str = "_sqlx_migrations";

/// How far a ledger file is behind the schema this build carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Schema files compiled into this build.
    pub embedded: usize,
    /// Files recorded as successfully applied to the open database.
    pub applied: usize,
}

impl MigrationStatus {
    /// Whether every embedded file has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }
}

/// Applies any schema files the database has not seen yet.
///
/// Running it again on an up-to-date ledger changes nothing.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Bringing ledger schema up to date");

    MIGRATOR.run(pool).await?;

    info!("Ledger schema is current");
    Ok(())
}

/// Reports embedded versus applied schema files.
///
/// A database that has never been migrated has no bookkeeping table and
/// reports zero applied; any other failure is returned.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let embedded = MIGRATOR.migrations.len();

    let tracked: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
    )
    .bind(BOOKKEEPING_TABLE)
    .fetch_one(pool)
    .await?;

    if !tracked {
        return Ok(MigrationStatus {
            embedded,
            applied: 0,
        });
    }

    let applied: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {BOOKKEEPING_TABLE} WHERE success = 1"
    ))
    .fetch_one(pool)
    .await?;

    Ok(MigrationStatus {
        embedded,
        applied: usize::try_from(applied).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_fresh_database_reports_nothing_applied() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let status = migration_status(db.pool()).await.unwrap();

        assert_eq!(status.applied, 0);
        assert!(status.embedded >= 1);
        assert!(!status.is_current());
    }

    #[tokio::test]
    async fn test_status_after_migrating() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let status = migration_status(db.pool()).await.unwrap();

        assert!(status.is_current());
        assert_eq!(status.applied, status.embedded);
    }

    #[tokio::test]
    async fn test_status_errors_are_not_swallowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = migration_status(db.pool()).await.unwrap_err();

        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}
