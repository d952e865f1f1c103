//! # Stock Repository
//!
//! One row per product in `estoque`. Setting stock replaces whatever was
//! stored for that product; it never adds to the old quantity.
//!
//! ```text
//! upsert(Rice, 10, 2.50)   estoque: Rice | 10 | 250
//! upsert(Rice,  4, 2.75)   estoque: Rice |  4 | 275   (same row)
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fidelidade_core::{NewStockItem, StockItem};

const SELECT_STOCK: &str = r#"
    SELECT
        produto AS product,
        quantidade AS quantity,
        preco_unitario_centavos AS unit_price_cents
    FROM estoque
"#;

/// Repository for stock database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Inserts or replaces the stock row for `item.product`.
    ///
    /// ## Returns
    /// The row as stored after commit.
    pub async fn upsert(&self, item: &NewStockItem) -> DbResult<StockItem> {
        debug!(
            product = %item.product,
            quantity = item.quantity,
            unit_price_cents = item.unit_price.cents(),
            "Upserting stock"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query(
            r#"
            INSERT INTO estoque (produto, quantidade, preco_unitario_centavos)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(produto) DO UPDATE SET
                quantidade = excluded.quantidade,
                preco_unitario_centavos = excluded.preco_unitario_centavos
            "#,
        )
        .bind(&item.product)
        .bind(item.quantity)
        .bind(item.unit_price.cents())
        .execute(&mut *tx)
        .await?;

        let stored: StockItem = sqlx::query_as(&format!("{SELECT_STOCK} WHERE produto = ?1"))
            .bind(&item.product)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(stored)
    }

    /// Gets the stock row for a product, if any.
    pub async fn get(&self, product: &str) -> DbResult<Option<StockItem>> {
        let item = sqlx::query_as::<_, StockItem>(&format!("{SELECT_STOCK} WHERE produto = ?1"))
            .bind(product)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists every stock row ordered by product name.
    pub async fn list(&self) -> DbResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(&format!("{SELECT_STOCK} ORDER BY produto"))
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Counts stocked products (rows, not units).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM estoque")
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
    use fidelidade_core::{Money, NewStockItem};

    fn item(product: &str, quantity: i64, cents: i64) -> NewStockItem {
        NewStockItem {
            product: product.to_string(),
            quantity,
            unit_price: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.stock().upsert(&item("Rice", 10, 250)).await.unwrap();
        let stored = db.stock().upsert(&item("Rice", 4, 275)).await.unwrap();

        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.unit_price(), Money::from_cents(275));
        assert_eq!(db.stock().count().await.unwrap(), 1);

        let fetched = db.stock().get("Rice").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.stock().upsert(&item("Sugar", 3, 400)).await.unwrap();
        db.stock().upsert(&item("Beans", 7, 900)).await.unwrap();

        let names: Vec<String> = db
            .stock()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.product)
            .collect();

        assert_eq!(names, vec!["Beans", "Sugar"]);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.stock().get("Nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_quantity_and_price_are_stored() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let stored = db.stock().upsert(&item("Sample", 0, 0)).await.unwrap();

        assert_eq!(stored.quantity, 0);
        assert!(stored.unit_price().is_zero());
    }
}
