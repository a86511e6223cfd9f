// A line item is one billable row of an invoice: description × quantity × unit price.
//
// `LineItem` is the persisted row as read back from the invoice API.
// `LineItemInput` is a candidate row collected before submission; it is only
// turned into a request once it passes validation.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Result};
use crate::modules::invoices::services::LineItemCalculator;

/// Description sent for rows left blank by the submitter
pub const UNTITLED_ITEM: &str = "Untitled Item";

/// A persisted line item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Server-assigned identifier
    pub id: String,

    /// Description of the product or service
    pub description: String,

    /// Quantity, at least 1
    pub quantity: u32,

    /// Price per unit, non-negative
    pub unit_price: Decimal,
}

impl LineItem {
    /// quantity × unit_price, unrounded
    pub fn line_total(&self) -> Result<Decimal> {
        LineItemCalculator::line_total(i64::from(self.quantity), self.unit_price)
    }
}

/// A line item candidate awaiting submission
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl LineItemInput {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Result<Decimal> {
        LineItemCalculator::line_total(self.quantity, self.unit_price)
    }

    /// Description to submit, substituting the placeholder for blank rows
    pub fn submitted_description(&self) -> String {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            UNTITLED_ITEM.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Quantity must be a positive integer, unit price non-negative
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= 0 {
            return Err(AppError::validation("Item quantity must be at least 1"));
        }

        if u32::try_from(self.quantity).is_err() {
            return Err(AppError::validation(format!(
                "Item quantity cannot exceed {}",
                u32::MAX
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                self.unit_price
            )));
        }

        Ok(())
    }
}
