//! # Summary Repository
//!
//! Read-only dashboard figures across all three tables.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fidelidade_core::{LastSale, Money, Summary};

/// Repository computing the dashboard summary.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    pool: SqlitePool,
}

impl SummaryRepository {
    /// Creates a new SummaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SummaryRepository { pool }
    }

    /// Computes the dashboard summary.
    ///
    /// An empty store gives zeros and no last sale. The last sale is the one
    /// with the highest id.
    pub async fn compute(&self) -> DbResult<Summary> {
        let (total_stock_quantity, total_sales_cents, open_credit_count, open_credit_cents): (
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COALESCE(SUM(quantidade), 0) FROM estoque),
                (SELECT COALESCE(SUM(valor_centavos), 0) FROM vendas),
                (SELECT COUNT(*) FROM fiado WHERE pago = 0),
                (SELECT COALESCE(SUM(valor_centavos), 0) FROM fiado WHERE pago = 0)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let last_sale: Option<(String, DateTime<Utc>)> =
            sqlx::query_as("SELECT produto, data FROM vendas ORDER BY id DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        debug!(
            total_stock_quantity,
            total_sales_cents, open_credit_count, "Computed summary"
        );

        Ok(Summary {
            total_stock_quantity,
            total_sales: Money::from_cents(total_sales_cents),
            open_credit_count,
            open_credit_total: Money::from_cents(open_credit_cents),
            last_sale: last_sale.map(|(product, sold_at)| LastSale { product, sold_at }),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
