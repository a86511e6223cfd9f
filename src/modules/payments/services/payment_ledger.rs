use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::{format_currency, AppError, Result};
use crate::modules::invoices::models::{Invoice, Payment};

/// Payment accounting for a single invoice.
///
/// Payments are append-only. A rejected payment leaves the ledger untouched,
/// so `balance_due` can never go below zero through this type.
pub struct PaymentLedger;

impl PaymentLedger {
    /// Σ payment amounts
    pub fn amount_paid(payments: &[Payment]) -> Result<Decimal> {
        payments.iter().try_fold(Decimal::ZERO, |paid, payment| {
            paid.checked_add(payment.amount)
                .ok_or_else(AppError::amount_too_large)
        })
    }

    /// total − amount paid, floored at zero for ledgers recorded elsewhere
    pub fn balance_due(total: Decimal, payments: &[Payment]) -> Result<Decimal> {
        let balance = total
            .checked_sub(Self::amount_paid(payments)?)
            .ok_or_else(AppError::amount_too_large)?;
        Ok(balance.max(Decimal::ZERO))
    }

    /// Checks a candidate payment against the invoice's current balance
    pub fn validate_payment(invoice: &Invoice, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(AppError::validation("amount must be > 0"));
        }

        let balance_due = invoice.balance_due()?;
        if amount > balance_due {
            return Err(AppError::validation(format!(
                "amount exceeds balance due of {}",
                format_currency(balance_due, &invoice.currency)
            )));
        }

        Ok(())
    }

    /// Validates and appends a payment. The id and date are assigned by the
    /// persisting side.
    pub fn record_payment(
        invoice: &mut Invoice,
        amount: Decimal,
        id: impl Into<String>,
        payment_date: DateTime<Utc>,
    ) -> Result<&Payment> {
        Self::validate_payment(invoice, amount)?;

        let index = invoice.payments.len();
        invoice.payments.push(Payment {
            id: id.into(),
            amount,
            payment_date: Some(payment_date),
        });

        Ok(&invoice.payments[index])
    }
}
