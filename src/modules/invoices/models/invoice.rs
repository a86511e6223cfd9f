// Invoice aggregate as read from the invoice API.
//
// Subtotal, tax, total, amount paid and balance due are never stored here;
// they are recomputed from line items, tax rate and payments on every read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;
use super::payment::Payment;
use crate::core::{format_currency, AppError, Result};
use crate::modules::invoices::services::LineItemCalculator;
use crate::modules::payments::PaymentLedger;
use crate::modules::taxes::{InvoiceTotals, TaxCalculator};

/// Lifecycle flag persisted by the server, chosen once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoredStatus {
    #[default]
    #[serde(alias = "draft")]
    Draft,

    #[serde(alias = "paid")]
    Paid,
}

impl std::fmt::Display for StoredStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredStatus::Draft => write!(f, "DRAFT"),
            StoredStatus::Paid => write!(f, "PAID"),
        }
    }
}

impl std::str::FromStr for StoredStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(StoredStatus::Draft),
            "PAID" => Ok(StoredStatus::Paid),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// Read-only snapshot of an invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub address: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub currency: String,

    /// Percentage, 0–100
    pub tax_rate: Decimal,

    /// Display order is insertion order
    pub line_items: Vec<LineItem>,

    pub status: StoredStatus,
    pub is_archived: bool,

    /// Time order
    pub payments: Vec<Payment>,
}

impl Invoice {
    /// Σ line totals
    pub fn subtotal(&self) -> Result<Decimal> {
        LineItemCalculator::subtotal(
            self.line_items
                .iter()
                .map(|item| (i64::from(item.quantity), item.unit_price)),
        )
    }

    pub fn totals(&self) -> Result<InvoiceTotals> {
        TaxCalculator::new().totals(self.subtotal()?, self.tax_rate)
    }

    pub fn tax_amount(&self) -> Result<Decimal> {
        Ok(self.totals()?.tax_amount)
    }

    pub fn total(&self) -> Result<Decimal> {
        Ok(self.totals()?.total)
    }

    pub fn amount_paid(&self) -> Result<Decimal> {
        PaymentLedger::amount_paid(&self.payments)
    }

    pub fn balance_due(&self) -> Result<Decimal> {
        PaymentLedger::balance_due(self.total()?, &self.payments)
    }

    /// Formats an amount in this invoice's currency
    pub fn format_money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.currency)
    }
}

/// Row of the invoice list. List responses may omit line items and payments,
/// so the money figures are resolved once when the summary is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub currency: String,
    pub status: StoredStatus,
    pub is_archived: bool,
    pub total: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
}

impl TryFrom<&Invoice> for InvoiceSummary {
    type Error = AppError;

    fn try_from(invoice: &Invoice) -> Result<Self> {
        Ok(Self {
            id: invoice.id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            customer_name: invoice.customer_name.clone(),
            due_date: Some(invoice.due_date),
            currency: invoice.currency.clone(),
            status: invoice.status,
            is_archived: invoice.is_archived,
            total: invoice.total()?,
            amount_paid: invoice.amount_paid()?,
            balance_due: invoice.balance_due()?,
        })
    }
}
