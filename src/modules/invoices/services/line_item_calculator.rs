use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Per-row totals and subtotal aggregation.
///
/// All arithmetic is exact decimal; nothing is rounded here. Rounding happens
/// only when an amount is formatted for display. Results outside the decimal
/// range are refused instead of wrapping or panicking.
pub struct LineItemCalculator;

impl LineItemCalculator {
    /// lineTotal = quantity × unit_price
    pub fn line_total(quantity: i64, unit_price: Decimal) -> Result<Decimal> {
        Decimal::from(quantity)
            .checked_mul(unit_price)
            .ok_or_else(AppError::amount_too_large)
    }

    /// subtotal = Σ line totals over `(quantity, unit_price)` rows
    pub fn subtotal<I>(rows: I) -> Result<Decimal>
    where
        I: IntoIterator<Item = (i64, Decimal)>,
    {
        rows.into_iter()
            .try_fold(Decimal::ZERO, |subtotal, (quantity, unit_price)| {
                subtotal
                    .checked_add(Self::line_total(quantity, unit_price)?)
                    .ok_or_else(AppError::amount_too_large)
            })
    }
}
