use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::invoice::StoredStatus;
use super::line_item::LineItemInput;
use crate::core::{AppError, Result, DEFAULT_CURRENCY};
use crate::modules::invoices::services::LineItemCalculator;
use crate::modules::taxes::{InvoiceTotals, TaxCalculator};

/// Everything needed to create an invoice. Nothing is sent unless
/// [`NewInvoice::validate`] passes, so a rejected submission saves nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub tax_rate: Decimal,
    pub status: StoredStatus,
    pub items: Vec<LineItemInput>,
}

impl NewInvoice {
    /// Checks run in form order; the first failure is reported
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }

        if self.invoice_number.trim().is_empty() {
            return Err(AppError::validation("Invoice number is required"));
        }

        if self.items.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one line item",
            ));
        }

        for item in &self.items {
            item.validate()?;
        }

        TaxCalculator::new().validate_tax_rate(self.tax_rate)?;
        self.totals()?;

        if self.due_date < self.issue_date {
            return Err(AppError::validation(
                "Due date cannot be before the issue date",
            ));
        }

        Ok(())
    }

    /// Subtotal, tax and total of the rows as entered
    pub fn totals(&self) -> Result<InvoiceTotals> {
        let subtotal = LineItemCalculator::subtotal(
            self.items
                .iter()
                .map(|item| (item.quantity, item.unit_price)),
        )?;
        TaxCalculator::new().totals(subtotal, self.tax_rate)
    }

    /// Currency code to submit; blank means the default
    pub fn currency_code(&self) -> String {
        let code = self.currency.trim();
        if code.is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            code.to_uppercase()
        }
    }
}
