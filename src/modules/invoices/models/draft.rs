// In-progress invoice form state, held locally until submission.
//
// Rows are keyed by `LocalItemId`, which is only unique inside one draft and
// must never be used once the server has assigned real line-item ids.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::invoice::StoredStatus;
use super::line_item::LineItemInput;
use super::new_invoice::NewInvoice;
use super::status::DisplayStatus;
use crate::core::{AppError, Result, DEFAULT_CURRENCY};
use crate::modules::invoices::services::LineItemCalculator;
use crate::modules::taxes::{InvoiceTotals, TaxCalculator};

/// Default days between issue and due date
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 14;

/// Row key local to one draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalItemId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub local_id: LocalItemId,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl DraftItem {
    fn blank(local_id: LocalItemId) -> Self {
        Self {
            local_id,
            description: String::new(),
            quantity: 1,
            unit_price: Decimal::ZERO,
        }
    }

    pub fn line_total(&self) -> Result<Decimal> {
        LineItemCalculator::line_total(self.quantity, self.unit_price)
    }
}

/// One field edit on a draft row
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Description(String),
    Quantity(i64),
    UnitPrice(Decimal),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: String,
    pub tax_rate: Decimal,
    items: Vec<DraftItem>,
    next_local_id: u64,
}

impl InvoiceDraft {
    /// Fresh form: number from the clock, issued today, due after
    /// `payment_terms_days`, in `currency` (blank means the default), one blank row
    pub fn starting_at(now: DateTime<Utc>, payment_terms_days: u32, currency: &str) -> Self {
        let issue_date = now.date_naive();
        let millis = now.timestamp_millis().rem_euclid(100_000);

        let mut draft = Self {
            invoice_number: format!("INV-{:05}", millis),
            customer_name: String::new(),
            customer_email: String::new(),
            address: String::new(),
            issue_date,
            due_date: issue_date + Duration::days(i64::from(payment_terms_days)),
            currency: match currency.trim() {
                "" => DEFAULT_CURRENCY.to_string(),
                code => code.to_uppercase(),
            },
            tax_rate: Decimal::ZERO,
            items: Vec::new(),
            next_local_id: 1,
        };
        draft.add_item();
        draft
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    /// Appends a blank row (quantity 1, price 0)
    pub fn add_item(&mut self) -> LocalItemId {
        let local_id = LocalItemId(self.next_local_id);
        self.next_local_id += 1;
        self.items.push(DraftItem::blank(local_id));
        local_id
    }

    pub fn update_item(&mut self, local_id: LocalItemId, edit: ItemEdit) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.local_id == local_id)
            .ok_or_else(|| AppError::validation("Line item not found"))?;

        match edit {
            ItemEdit::Description(description) => item.description = description,
            ItemEdit::Quantity(quantity) => item.quantity = quantity,
            ItemEdit::UnitPrice(unit_price) => item.unit_price = unit_price,
        }
        Ok(())
    }

    /// Removes a row; the last remaining row is kept. Returns whether a row was removed.
    pub fn remove_item(&mut self, local_id: LocalItemId) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.local_id != local_id);
        self.items.len() != before
    }

    /// Live preview totals through the same engine used for saved invoices.
    /// Rows are not validated yet, so an out-of-range preview is an error.
    pub fn totals(&self) -> Result<InvoiceTotals> {
        let subtotal = LineItemCalculator::subtotal(
            self.items
                .iter()
                .map(|item| (item.quantity, item.unit_price)),
        )?;
        TaxCalculator::new().totals(subtotal, self.tax_rate)
    }

    pub fn preview_status(&self) -> DisplayStatus {
        DisplayStatus::Draft
    }

    /// Local row ids in display order
    pub fn local_ids(&self) -> Vec<LocalItemId> {
        self.items.iter().map(|item| item.local_id).collect()
    }

    /// Snapshot of the form as a creation request with the chosen status
    pub fn to_new_invoice(&self, status: StoredStatus) -> NewInvoice {
        NewInvoice {
            invoice_number: self.invoice_number.clone(),
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            address: self.address.clone(),
            issue_date: self.issue_date,
            due_date: self.due_date,
            currency: self.currency.clone(),
            tax_rate: self.tax_rate,
            status,
            items: self
                .items
                .iter()
                .map(|item| {
                    LineItemInput::new(item.description.clone(), item.quantity, item.unit_price)
                })
                .collect(),
        }
    }
}
