use std::sync::Arc;

use crate::core::Result;
use crate::modules::invoices::models::InvoiceSummary;
use crate::modules::invoices::services::InvoiceLifecycleManager;
use crate::modules::reports::models::DashboardSummary;

/// Builds the dashboard from the current invoice list
pub struct DashboardService {
    manager: Arc<InvoiceLifecycleManager>,
}

impl DashboardService {
    pub fn new(manager: Arc<InvoiceLifecycleManager>) -> Self {
        Self { manager }
    }

    /// Archived invoices are counted; archiving only hides rows
    pub async fn summary(&self) -> Result<DashboardSummary> {
        let invoices = self.manager.list().await?;
        let summary = DashboardSummary::from_invoices(&invoices)?;

        tracing::debug!(
            total_count = summary.total_count,
            paid_count = summary.paid_count,
            currencies = summary.by_currency.len(),
            "Dashboard summary built"
        );

        if summary.is_multi_currency() {
            tracing::warn!(
                currencies = summary.by_currency.len(),
                "Dashboard totals mix several currencies"
            );
        }

        Ok(summary)
    }
}

/// Rows not archived, order kept
pub fn active_only(invoices: &[InvoiceSummary]) -> Vec<InvoiceSummary> {
    invoices
        .iter()
        .filter(|invoice| !invoice.is_archived)
        .cloned()
        .collect()
}
