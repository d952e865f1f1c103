//! # Summary Command
//!
//! The dashboard shown by `fidelidade summary`.

use serde::Serialize;
use tracing::debug;

use super::{format_timestamp, View};
use crate::config::AppConfig;
use crate::error::ApiError;
use fidelidade_core::Summary;
use fidelidade_db::Database;

/// Dashboard figures plus the store name.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub store_name: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Computes the dashboard.
pub async fn show(db: &Database, config: &AppConfig) -> Result<DashboardView, ApiError> {
    let summary = db.summary().compute().await?;

    debug!(empty = summary.is_empty(), "Dashboard computed");

    Ok(DashboardView {
        store_name: config.store_name.clone(),
        summary,
    })
}

impl View for DashboardView {
    fn render(&self) -> String {
        let s = &self.summary;
        let last_sale = match &s.last_sale {
            Some(last) => format!("{} at {}", last.product, format_timestamp(last.sold_at)),
            None => "none".to_string(),
        };

        [
            format!("== {} ==", self.store_name),
            format!("Stock on hand: {} units", s.total_stock_quantity),
            format!("Sales total:   {}", s.total_sales),
            format!(
                "Open fiado:    {} entries ({})",
                s.open_credit_count, s.open_credit_total
            ),
            format!("Last sale:     {}", last_sale),
        ]
        .join("\n")
    }
}
