//! # Sale Repository
//!
//! Append-only sales log (`vendas`).
//!
//! Recording a sale touches neither stock nor credit: the register keeps
//! the three ledgers independent and the cashier adjusts stock by hand.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fidelidade_core::{NewSale, Sale, SaleId};

const SELECT_SALE: &str = r#"
    SELECT
        id,
        produto AS product,
        quantidade AS quantity,
        valor_centavos AS amount_cents,
        data AS created_at
    FROM vendas
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends a sale stamped with the current time.
    ///
    /// ## Returns
    /// The stored sale with its store-assigned id.
    pub async fn record(&self, sale: &NewSale) -> DbResult<Sale> {
        let now = Utc::now();

        debug!(
            product = %sale.product,
            quantity = sale.quantity,
            amount_cents = sale.amount.cents(),
            "Recording sale"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let result = sqlx::query(
            r#"
            INSERT INTO vendas (produto, quantidade, valor_centavos, data)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&sale.product)
        .bind(sale.quantity)
        .bind(sale.amount.cents())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            product: sale.product.clone(),
            quantity: sale.quantity,
            amount_cents: sale.amount.cents(),
            created_at: now,
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: SaleId) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Lists the most recent sales, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} ORDER BY id DESC LIMIT ?1"))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use fidelidade_core::{Money, NewSale};

    fn sale(product: &str, cents: i64) -> NewSale {
        NewSale {
            product: product.to_string(),
            quantity: 2,
            amount: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_record_appends_one_row() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = db.sales().record(&sale("Bread", 1000)).await.unwrap();
        let second = db.sales().record(&sale("Bread", 1000)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(db.sales().count().await.unwrap(), 2);

        let fetched = db.sales().get_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(fetched.product, "Bread");
        assert_eq!(fetched.quantity, 2);
        assert_eq!(fetched.amount(), Money::from_cents(1000));
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.sales().record(&sale("Bread", 100)).await.unwrap();
        db.sales().record(&sale("Milk", 200)).await.unwrap();
        db.sales().record(&sale("Coffee", 300)).await.unwrap();

        let recent = db.sales().list_recent(2).await.unwrap();
        let names: Vec<&str> = recent.iter().map(|s| s.product.as_str()).collect();

        assert_eq!(names, vec!["Coffee", "Milk"]);
    }

    #[tokio::test]
    async fn test_sale_does_not_touch_stock_or_credit() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.sales().record(&sale("Rice", 500)).await.unwrap();

        assert_eq!(db.stock().count().await.unwrap(), 0);
        assert!(db.credits().list_open_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.sales().get_by_id(42).await.unwrap().is_none());
    }
}
