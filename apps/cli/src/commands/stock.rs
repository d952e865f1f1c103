//! # Stock Commands
//!
//! `stock set` replaces the quantity and price of one product; it does not
//! add to what was there. `stock list` shows every product.

use serde::Serialize;
use tracing::info;

use super::View;
use crate::error::ApiError;
use fidelidade_core::forms::StockForm;
use fidelidade_core::StockItem;
use fidelidade_db::Database;

/// Result of `stock set`.
#[derive(Debug, Clone, Serialize)]
pub struct StockSavedView(pub StockItem);

/// Result of `stock list`.
#[derive(Debug, Clone, Serialize)]
pub struct StockListView {
    pub items: Vec<StockItem>,
}

/// Validates the form and replaces the product's stock row.
pub async fn set(db: &Database, form: StockForm) -> Result<StockSavedView, ApiError> {
    let item = form.validate()?;
    let stored = db.stock().upsert(&item).await?;

    info!(product = %stored.product, quantity = stored.quantity, "Stock updated");

    Ok(StockSavedView(stored))
}

/// Lists stock ordered by product name.
pub async fn list(db: &Database) -> Result<StockListView, ApiError> {
    Ok(StockListView {
        items: db.stock().list().await?,
    })
}

impl View for StockSavedView {
    fn render(&self) -> String {
        format!(
            "Stock saved: {}, {} units at {}",
            self.0.product,
            self.0.quantity,
            self.0.unit_price()
        )
    }
}

impl View for StockListView {
    fn render(&self) -> String {
        if self.items.is_empty() {
            return "No stock recorded".to_string();
        }

        let mut lines = vec![format!("{:<30} {:>8} {:>14}", "Product", "Qty", "Unit price")];
        lines.extend(self.items.iter().map(|item| {
            format!(
                "{:<30} {:>8} {:>14}",
                item.product,
                item.quantity,
                item.unit_price().to_string()
            )
        }));
        lines.join("\n")
    }
}
