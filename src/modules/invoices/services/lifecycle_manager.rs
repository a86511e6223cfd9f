use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::invoice_view::InvoiceView;
use super::status_resolver::StatusResolver;
use crate::core::{AppError, InFlight, InFlightPermit, Result};
use crate::modules::gateway::models::{CreateInvoiceRequest, PaymentRequest};
use crate::modules::gateway::InvoiceGateway;
use crate::modules::invoices::models::{
    DisplayStatus, Invoice, InvoiceDraft, InvoiceSummary, LocalItemId, NewInvoice,
    SettlementPolicy, StoredStatus,
};
use crate::modules::payments::PaymentLedger;

/// Local draft row ids mapped to the ids the server assigned on creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIdMap {
    entries: Vec<(LocalItemId, String)>,
}

impl ItemIdMap {
    /// Pairs rows by position; the server keeps submission order
    fn by_position(local_ids: &[LocalItemId], invoice: &Invoice) -> Self {
        let entries = local_ids
            .iter()
            .zip(&invoice.line_items)
            .map(|(local_id, item)| (*local_id, item.id.clone()))
            .collect();
        Self { entries }
    }

    pub fn server_id(&self, local_id: LocalItemId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(local, _)| *local == local_id)
            .map(|(_, server_id)| server_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocalItemId, &str)> {
        self.entries
            .iter()
            .map(|(local_id, server_id)| (*local_id, server_id.as_str()))
    }
}

/// Result of creating an invoice from a draft
#[derive(Debug, Clone)]
pub struct CreatedInvoice {
    pub invoice: Invoice,
    pub item_ids: ItemIdMap,
}

/// Orchestrates invoice transitions against the invoice API.
///
/// No authoritative state is cached: every mutation fetches the current
/// invoice, validates locally, mutates, then refetches the canonical copy.
/// At most one mutation per invoice is in flight at a time.
pub struct InvoiceLifecycleManager {
    gateway: Arc<dyn InvoiceGateway>,
    in_flight: InFlight,
    resolver: StatusResolver,
}

impl InvoiceLifecycleManager {
    pub fn new(gateway: Arc<dyn InvoiceGateway>) -> Self {
        Self {
            gateway,
            in_flight: InFlight::new(),
            resolver: StatusResolver::default(),
        }
    }

    pub fn with_policy(mut self, policy: SettlementPolicy) -> Self {
        self.resolver = StatusResolver::new(policy);
        self
    }

    pub fn resolver(&self) -> &StatusResolver {
        &self.resolver
    }

    /// Whether a mutation on this invoice is awaiting its response
    pub fn is_busy(&self, invoice_id: &str) -> bool {
        self.in_flight.is_in_flight(&invoice_key(invoice_id))
    }

    pub fn display_status(&self, invoice: &Invoice, now: DateTime<Utc>) -> DisplayStatus {
        self.resolver.resolve(invoice, now)
    }

    /// All invoices, archived included, in server order
    pub async fn list(&self) -> Result<Vec<InvoiceSummary>> {
        let documents = self.gateway.list_invoices().await?;
        documents.into_iter().map(InvoiceSummary::try_from).collect()
    }

    pub async fn fetch(&self, invoice_id: &str) -> Result<Invoice> {
        let document = self.gateway.get_invoice(invoice_id).await?;
        Invoice::try_from(document)
    }

    /// Loads the invoice into `view` unless a newer load or a close happened
    /// meanwhile. Returns whether the view was updated.
    pub async fn refresh_into(&self, view: &InvoiceView, invoice_id: &str) -> Result<bool> {
        let ticket = view.begin();
        let invoice = self.fetch(invoice_id).await?;
        let applied = view.apply(ticket, invoice);
        if !applied {
            tracing::debug!(invoice_id, "Discarded stale invoice response");
        }
        Ok(applied)
    }

    /// Validates and submits a new invoice. A rejected invoice sends nothing.
    pub async fn create(&self, new_invoice: &NewInvoice) -> Result<Invoice> {
        let request = CreateInvoiceRequest::try_from(new_invoice)?;
        let _permit = self
            .in_flight
            .try_acquire(format!("Creating invoice {}", request.invoice_number))?;

        let invoice_id = self.gateway.create_invoice(&request).await?;
        let invoice = self.fetch(&invoice_id).await?;
        let total = invoice.total()?;

        tracing::info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            status = %invoice.status,
            total = %total,
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Submits a draft and remaps its local row ids to the server's
    pub async fn create_from_draft(
        &self,
        draft: &InvoiceDraft,
        status: StoredStatus,
    ) -> Result<CreatedInvoice> {
        let invoice = self.create(&draft.to_new_invoice(status)).await?;

        let local_ids = draft.local_ids();
        if local_ids.len() != invoice.line_items.len() {
            tracing::warn!(
                invoice_id = %invoice.id,
                submitted = local_ids.len(),
                returned = invoice.line_items.len(),
                "Server returned a different number of line items"
            );
        }

        let item_ids = ItemIdMap::by_position(&local_ids, &invoice);
        Ok(CreatedInvoice { invoice, item_ids })
    }

    /// Records a payment against the current balance.
    ///
    /// Each call is one attempt with its own idempotency key; nothing here
    /// retries. A server-side rejection is authoritative.
    pub async fn record_payment(&self, invoice_id: &str, amount: Decimal) -> Result<Invoice> {
        let _permit = self.acquire(invoice_id)?;

        let current = self.fetch(invoice_id).await?;
        PaymentLedger::validate_payment(&current, amount)?;

        let idempotency_key = Uuid::new_v4();
        self.gateway
            .add_payment(invoice_id, &PaymentRequest { amount }, idempotency_key)
            .await?;

        let invoice = self.fetch(invoice_id).await?;
        let balance_due = invoice.balance_due()?;
        tracing::info!(
            invoice_id,
            amount = %amount,
            balance_due = %balance_due,
            "Payment recorded"
        );

        Ok(invoice)
    }

    /// Active → Archived. Archiving an archived invoice is refused.
    pub async fn archive(&self, invoice_id: &str) -> Result<Invoice> {
        let _permit = self.acquire(invoice_id)?;

        let current = self.fetch(invoice_id).await?;
        if current.is_archived {
            return Err(AppError::invalid_transition(format!(
                "Invoice {} is already archived",
                current.invoice_number
            )));
        }

        if let Err(e) = self.gateway.archive_invoice(invoice_id).await {
            tracing::warn!(invoice_id, error = %e, "Failed to archive invoice");
            return Err(e);
        }

        let invoice = self.fetch(invoice_id).await?;
        tracing::info!(invoice_id, "Invoice archived");
        Ok(invoice)
    }

    /// Archived → Active. Restoring an active invoice is refused.
    pub async fn restore(&self, invoice_id: &str) -> Result<Invoice> {
        let _permit = self.acquire(invoice_id)?;

        let current = self.fetch(invoice_id).await?;
        if !current.is_archived {
            return Err(AppError::invalid_transition(format!(
                "Invoice {} is not archived",
                current.invoice_number
            )));
        }

        if let Err(e) = self.gateway.restore_invoice(invoice_id).await {
            tracing::warn!(invoice_id, error = %e, "Failed to restore invoice");
            return Err(e);
        }

        let invoice = self.fetch(invoice_id).await?;
        tracing::info!(invoice_id, "Invoice restored");
        Ok(invoice)
    }

    /// Archives an active invoice or restores an archived one
    pub async fn toggle_archive(&self, invoice_id: &str) -> Result<Invoice> {
        let current = self.fetch(invoice_id).await?;
        if current.is_archived {
            self.restore(invoice_id).await
        } else {
            self.archive(invoice_id).await
        }
    }

    fn acquire(&self, invoice_id: &str) -> Result<InFlightPermit> {
        self.in_flight.try_acquire(invoice_key(invoice_id))
    }
}

fn invoice_key(invoice_id: &str) -> String {
    format!("An update to invoice {}", invoice_id)
}
