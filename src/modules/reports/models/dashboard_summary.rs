use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{InvoiceSummary, StoredStatus};

/// Number of rows in the recent-invoices panel
pub const RECENT_INVOICE_COUNT: usize = 5;

/// Headline figures over a list of invoices
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Σ amount paid
    pub total_revenue: Decimal,
    /// Σ balance due
    pub pending_amount: Decimal,
    /// Invoices stored as PAID
    pub paid_count: usize,
    pub total_count: usize,
    /// First rows in server order
    pub recent: Vec<InvoiceSummary>,
    /// The same sums split by currency, in first-seen order
    pub by_currency: Vec<CurrencyTotals>,
}

/// Revenue and pending amount for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotals {
    pub currency: String,
    pub revenue: Decimal,
    pub pending: Decimal,
    pub invoice_count: usize,
}

impl DashboardSummary {
    pub fn from_invoices(invoices: &[InvoiceSummary]) -> Result<Self> {
        let mut by_currency: Vec<CurrencyTotals> = Vec::new();
        let mut total_revenue = Decimal::ZERO;
        let mut pending_amount = Decimal::ZERO;

        for invoice in invoices {
            total_revenue = checked_sum(total_revenue, invoice.amount_paid)?;
            pending_amount = checked_sum(pending_amount, invoice.balance_due)?;

            match by_currency
                .iter_mut()
                .find(|totals| totals.currency == invoice.currency)
            {
                Some(totals) => {
                    totals.revenue = checked_sum(totals.revenue, invoice.amount_paid)?;
                    totals.pending = checked_sum(totals.pending, invoice.balance_due)?;
                    totals.invoice_count += 1;
                }
                None => by_currency.push(CurrencyTotals {
                    currency: invoice.currency.clone(),
                    revenue: invoice.amount_paid,
                    pending: invoice.balance_due,
                    invoice_count: 1,
                }),
            }
        }

        Ok(Self {
            total_revenue,
            pending_amount,
            paid_count: invoices
                .iter()
                .filter(|invoice| invoice.status == StoredStatus::Paid)
                .count(),
            total_count: invoices.len(),
            recent: invoices.iter().take(RECENT_INVOICE_COUNT).cloned().collect(),
            by_currency,
        })
    }

    /// Whether more than one currency is mixed into the headline sums
    pub fn is_multi_currency(&self) -> bool {
        self.by_currency.len() > 1
    }
}

fn checked_sum(acc: Decimal, amount: Decimal) -> Result<Decimal> {
    acc.checked_add(amount).ok_or_else(AppError::amount_too_large)
}
