//! # Credit Repository
//!
//! Store-credit ("fiado") entries and their settlement.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Fiado Lifecycle                                   │
//! │                                                                         │
//! │  1. REGISTER                                                           │
//! │     └── register() → CreditEntry { paid: false }                       │
//! │                                                                         │
//! │  2. LIST                                                               │
//! │     └── list_open_accounts() → AccountSummary per (customer, phone)    │
//! │                                                                         │
//! │  3. SETTLE                                                             │
//! │     └── settle(account.entry_ids) → rows flipped to paid               │
//! │         (one transaction; already-paid ids are not counted)            │
//! │                                                                         │
//! │  Settled entries are kept; they just stop showing up as open.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use fidelidade_core::ledger::{group_open_accounts, open_balance};
use fidelidade_core::{AccountSummary, CreditEntry, CreditEntryId, Money, NewCreditEntry};

const SELECT_CREDIT: &str = r#"
    SELECT
        id,
        cliente AS customer,
        telefone AS phone,
        produto AS product,
        quantidade AS quantity,
        valor_centavos AS amount_cents,
        data AS created_at,
        pago AS paid
    FROM fiado
"#;

/// Ids bound per UPDATE statement, well under SQLite's variable limit.
const SETTLE_BATCH_SIZE: usize = 500;

/// Repository for credit database operations.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    pool: SqlitePool,
}

impl CreditRepository {
    /// Creates a new CreditRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CreditRepository { pool }
    }

    /// Registers a purchase on credit as an unpaid entry.
    pub async fn register(&self, entry: &NewCreditEntry) -> DbResult<CreditEntry> {
        let now = Utc::now();

        debug!(
            customer = %entry.customer,
            phone = entry.phone.as_deref().unwrap_or("-"),
            product = %entry.product,
            amount_cents = entry.amount.cents(),
            "Registering credit entry"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(
            r#"
            INSERT INTO fiado (cliente, telefone, produto, quantidade, valor_centavos, data, pago)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)
            "#,
        )
        .bind(&entry.customer)
        .bind(entry.phone.as_deref())
        .bind(&entry.product)
        .bind(entry.quantity)
        .bind(entry.amount.cents())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(CreditEntry {
            id: result.last_insert_rowid(),
            customer: entry.customer.clone(),
            phone: entry.phone.clone(),
            product: entry.product.clone(),
            quantity: entry.quantity,
            amount_cents: entry.amount.cents(),
            created_at: now,
            paid: false,
        })
    }

    /// Gets an entry by ID, paid or not.
    pub async fn get_by_id(&self, id: CreditEntryId) -> DbResult<Option<CreditEntry>> {
        let entry = sqlx::query_as::<_, CreditEntry>(&format!("{SELECT_CREDIT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Lists unpaid entries in id order.
    pub async fn list_open_entries(&self) -> DbResult<Vec<CreditEntry>> {
        let entries =
            sqlx::query_as::<_, CreditEntry>(&format!("{SELECT_CREDIT} WHERE pago = 0 ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(entries)
    }

    /// Groups unpaid entries into accounts.
    ///
    /// Empty when nothing is owed. See
    /// [`group_open_accounts`](fidelidade_core::ledger::group_open_accounts)
    /// for the grouping and ordering rules.
    pub async fn list_open_accounts(&self) -> DbResult<Vec<AccountSummary>> {
        let entries = self.list_open_entries().await?;
        let accounts = group_open_accounts(&entries)?;

        debug!(
            entries = entries.len(),
            accounts = accounts.len(),
            "Listed open accounts"
        );

        Ok(accounts)
    }

    /// Sum of every unpaid amount.
    pub async fn open_balance(&self) -> DbResult<Money> {
        let entries = self.list_open_entries().await?;
        Ok(open_balance(&entries)?)
    }

    /// Marks the given entries paid.
    ///
    /// ## Behavior
    /// - All ids are flipped in one transaction, or none are
    /// - Ids are bound as parameters
    /// - Missing or already-paid ids are skipped, so repeating a settlement
    ///   returns 0
    /// - An empty set returns 0 without opening a transaction
    ///
    /// ## Returns
    /// Number of entries that went from unpaid to paid.
    pub async fn settle(&self, ids: &BTreeSet<CreditEntryId>) -> DbResult<u64> {
        if ids.is_empty() {
            debug!("Nothing to settle");
            return Ok(0);
        }

        let ids: Vec<CreditEntryId> = ids.iter().copied().collect();
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;
        let mut settled = 0;

        for batch in ids.chunks(SETTLE_BATCH_SIZE) {
            let mut builder =
                QueryBuilder::<Sqlite>::new("UPDATE fiado SET pago = 1 WHERE pago = 0 AND id IN (");
            let mut separated = builder.separated(", ");
            for id in batch {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let result = builder.build().execute(&mut *tx).await?;
            settled += result.rows_affected();
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(requested = ids.len(), settled, "Settled credit entries");
        Ok(settled)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
