//! # Sale Commands
//!
//! Recording a sale appends to the sales log only. Stock is adjusted
//! separately with `stock set`.

use serde::Serialize;
use tracing::info;

use super::{format_timestamp, View};
use crate::error::ApiError;
use fidelidade_core::forms::SaleForm;
use fidelidade_core::Sale;
use fidelidade_db::Database;

/// Result of `sale record`.
#[derive(Debug, Clone, Serialize)]
pub struct SaleRecordedView(pub Sale);

/// Result of `sale list`.
#[derive(Debug, Clone, Serialize)]
pub struct SaleListView {
    pub sales: Vec<Sale>,
}

/// Validates the form and appends the sale.
pub async fn record(db: &Database, form: SaleForm) -> Result<SaleRecordedView, ApiError> {
    let sale = form.validate()?;
    let stored = db.sales().record(&sale).await?;

    info!(id = stored.id, product = %stored.product, amount_cents = stored.amount_cents, "Sale recorded");

    Ok(SaleRecordedView(stored))
}

/// Most recent sales, newest first.
pub async fn list(db: &Database, limit: u32) -> Result<SaleListView, ApiError> {
    Ok(SaleListView {
        sales: db.sales().list_recent(limit).await?,
    })
}

impl View for SaleRecordedView {
    fn render(&self) -> String {
        format!(
            "Sale #{} recorded: {} x{}, {}",
            self.0.id,
            self.0.product,
            self.0.quantity,
            self.0.amount()
        )
    }
}

impl View for SaleListView {
    fn render(&self) -> String {
        if self.sales.is_empty() {
            return "No sales recorded".to_string();
        }

        let mut lines = vec![format!(
            "{:>6}  {:<16}  {:<30} {:>6} {:>14}",
            "#", "Date", "Product", "Qty", "Amount"
        )];
        lines.extend(self.sales.iter().map(|sale| {
            format!(
                "{:>6}  {:<16}  {:<30} {:>6} {:>14}",
                sale.id,
                format_timestamp(sale.created_at),
                sale.product,
                sale.quantity,
                sale.amount().to_string()
            )
        }));
        lines.join("\n")
    }
}
