// Wire shapes of the invoice API.
//
// Responses are read leniently (ids as `id` or `_id`, dates as date-only or
// RFC 3339, money as numbers or numeric strings, optional collections) and
// converted into the domain types, where all derived figures are recomputed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::wire::{flexible_datetime_option, iso_date};
use crate::core::{AppError, Result, DEFAULT_CURRENCY};
use crate::modules::invoices::models::{
    Invoice, InvoiceSummary, LineItem, NewInvoice, Payment, StoredStatus,
};
use crate::modules::invoices::services::LineItemCalculator;
use crate::modules::taxes::TaxCalculator;

/// Invoice as returned by the list, detail and mutation endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub invoice_number: Option<String>,

    #[serde(default)]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default, with = "flexible_datetime_option")]
    pub issue_date: Option<DateTime<Utc>>,

    #[serde(default, with = "flexible_datetime_option")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub tax_rate: Option<Decimal>,

    /// Absent from some list responses
    #[serde(default, alias = "items")]
    pub line_items: Option<Vec<LineItemDocument>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub is_archived: Option<bool>,

    /// Absent from some list responses
    #[serde(default)]
    pub payments: Option<Vec<PaymentDocument>>,

    // Server-computed figures, used only when the collections are missing
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub total: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount_paid: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub balance_due: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDocument {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub quantity: u32,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDocument {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,

    #[serde(default, alias = "date", with = "flexible_datetime_option")]
    pub payment_date: Option<DateTime<Utc>>,
}

impl InvoiceDocument {
    fn stored_status(&self) -> StoredStatus {
        // Unknown lifecycle labels are treated as open invoices
        self.status
            .as_deref()
            .and_then(|status| status.parse().ok())
            .unwrap_or_default()
    }

    fn currency_code(&self) -> String {
        match self.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_uppercase(),
            _ => DEFAULT_CURRENCY.to_string(),
        }
    }

    fn subtotal(&self) -> Option<Result<Decimal>> {
        self.line_items.as_ref().map(|items| {
            LineItemCalculator::subtotal(
                items
                    .iter()
                    .map(|item| (i64::from(item.quantity), item.unit_price)),
            )
        })
    }
}

impl TryFrom<InvoiceDocument> for Invoice {
    type Error = AppError;

    fn try_from(document: InvoiceDocument) -> Result<Self> {
        let status = document.stored_status();
        let currency = document.currency_code();

        let issue_date = document
            .issue_date
            .ok_or_else(|| AppError::decode(format!("invoice {} has no issue date", document.id)))?;
        let due_date = document
            .due_date
            .ok_or_else(|| AppError::decode(format!("invoice {} has no due date", document.id)))?;

        let line_items = document
            .line_items
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                let id = item.id.ok_or_else(|| {
                    AppError::decode(format!(
                        "line item {} of invoice {} has no id",
                        position + 1,
                        document.id
                    ))
                })?;
                Ok(LineItem {
                    id,
                    description: item.description.unwrap_or_default(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let payments = document
            .payments
            .unwrap_or_default()
            .into_iter()
            .map(|payment| Payment {
                id: payment.id.unwrap_or_default(),
                amount: payment.amount,
                payment_date: payment.payment_date,
            })
            .collect();

        let invoice = Invoice {
            id: document.id,
            invoice_number: document.invoice_number.unwrap_or_default(),
            customer_name: document.customer_name.unwrap_or_default(),
            customer_email: document.customer_email.unwrap_or_default(),
            address: document.address.unwrap_or_default(),
            issue_date,
            due_date,
            currency,
            tax_rate: document.tax_rate.unwrap_or(Decimal::ZERO),
            line_items,
            status,
            is_archived: document.is_archived.unwrap_or(false),
            payments,
        };

        // Every derived figure must be computable once the invoice is accepted
        if invoice.balance_due().is_err() {
            return Err(out_of_range(&invoice.id));
        }

        Ok(invoice)
    }
}

fn out_of_range(id: &str) -> AppError {
    AppError::decode(format!("invoice {} has amounts out of range", id))
}

impl TryFrom<InvoiceDocument> for InvoiceSummary {
    type Error = AppError;

    fn try_from(document: InvoiceDocument) -> Result<Self> {
        let status = document.stored_status();
        let currency = document.currency_code();
        let tax_rate = document.tax_rate.unwrap_or(Decimal::ZERO);

        let total = match document.subtotal() {
            Some(subtotal) => subtotal
                .and_then(|subtotal| TaxCalculator::new().totals(subtotal, tax_rate))
                .map_err(|_| out_of_range(&document.id))?
                .total,
            None => document.total.unwrap_or(Decimal::ZERO),
        };

        let amount_paid = match &document.payments {
            Some(payments) => payments
                .iter()
                .try_fold(Decimal::ZERO, |paid, payment| paid.checked_add(payment.amount))
                .ok_or_else(|| out_of_range(&document.id))?,
            None => document.amount_paid.unwrap_or(Decimal::ZERO),
        };

        let server_balance = document
            .balance_due
            .filter(|_| document.line_items.is_none() && document.payments.is_none());
        let balance_due = match server_balance {
            Some(balance_due) => balance_due,
            None => total
                .checked_sub(amount_paid)
                .ok_or_else(|| out_of_range(&document.id))?
                .max(Decimal::ZERO),
        };

        Ok(InvoiceSummary {
            id: document.id,
            invoice_number: document.invoice_number.unwrap_or_default(),
            customer_name: document.customer_name.unwrap_or_default(),
            due_date: document.due_date,
            currency,
            status,
            is_archived: document.is_archived.unwrap_or(false),
            total,
            amount_paid,
            balance_due,
        })
    }
}

/// Body of `POST /api/invoices`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub address: String,

    #[serde(with = "iso_date")]
    pub issue_date: NaiveDate,

    #[serde(with = "iso_date")]
    pub due_date: NaiveDate,

    pub currency: String,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_rate: Decimal,

    pub status: StoredStatus,
    pub items: Vec<CreateLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineItem {
    pub description: String,
    pub quantity: u32,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
}

/// Only a validated invoice becomes a request, so a rejected submission
/// never reaches the network
impl TryFrom<&NewInvoice> for CreateInvoiceRequest {
    type Error = AppError;

    fn try_from(invoice: &NewInvoice) -> Result<Self> {
        invoice.validate()?;

        let items = invoice
            .items
            .iter()
            .map(|item| {
                let quantity = u32::try_from(item.quantity).map_err(|_| {
                    AppError::validation("Item quantity must be at least 1")
                })?;
                Ok(CreateLineItem {
                    description: item.submitted_description(),
                    quantity,
                    unit_price: item.unit_price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            invoice_number: invoice.invoice_number.trim().to_string(),
            customer_name: invoice.customer_name.trim().to_string(),
            customer_email: invoice.customer_email.trim().to_string(),
            address: invoice.address.trim().to_string(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            currency: invoice.currency_code(),
            tax_rate: invoice.tax_rate,
            status: invoice.status,
            items,
        })
    }
}

/// Body of `POST /api/invoices/{id}/payments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// `{invoice: {...}}` envelope around single-invoice responses
#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceEnvelope {
    pub invoice: InvoiceDocument,
}

/// `{invoices: [...]}` envelope some deployments use for the list
#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceListEnvelope {
    pub invoices: Vec<InvoiceDocument>,
}
