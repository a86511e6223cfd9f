use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};
use crate::modules::taxes::models::InvoiceTotals;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// TaxCalculator applies an invoice-level percentage rate to the subtotal
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// tax_amount = subtotal × (tax_rate / 100)
    ///
    /// The rate is a percentage (10 means 10%). The result is not rounded.
    pub fn tax_amount(&self, subtotal: Decimal, tax_rate: Decimal) -> Result<Decimal> {
        subtotal
            .checked_mul(tax_rate / ONE_HUNDRED)
            .ok_or_else(AppError::amount_too_large)
    }

    /// Subtotal, tax and grand total for a subtotal and rate
    pub fn totals(&self, subtotal: Decimal, tax_rate: Decimal) -> Result<InvoiceTotals> {
        let tax_amount = self.tax_amount(subtotal, tax_rate)?;
        let total = subtotal
            .checked_add(tax_amount)
            .ok_or_else(AppError::amount_too_large)?;

        Ok(InvoiceTotals {
            subtotal,
            tax_amount,
            total,
        })
    }

    /// Tax rate must be a percentage within 0..=100
    pub fn validate_tax_rate(&self, tax_rate: Decimal) -> Result<()> {
        if tax_rate < Decimal::ZERO || tax_rate > ONE_HUNDRED {
            return Err(AppError::Validation(
                "Tax rate must be between 0 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
