use async_trait::async_trait;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::gateway::models::{CreateInvoiceRequest, InvoiceDocument, PaymentRequest};

/// One operation per lifecycle action against the invoice API.
///
/// Implementations never retry. Mutations report only success or failure;
/// callers refetch the canonical invoice afterwards.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// `GET /api/invoices`
    async fn list_invoices(&self) -> Result<Vec<InvoiceDocument>>;

    /// `GET /api/invoices/{id}`
    async fn get_invoice(&self, id: &str) -> Result<InvoiceDocument>;

    /// `POST /api/invoices`, returning the server-assigned invoice id
    async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<String>;

    /// `POST /api/invoices/{id}/payments`
    ///
    /// The idempotency key identifies one user-initiated attempt.
    async fn add_payment(
        &self,
        id: &str,
        request: &PaymentRequest,
        idempotency_key: Uuid,
    ) -> Result<()>;

    /// `POST /api/invoices/{id}/archive`
    async fn archive_invoice(&self, id: &str) -> Result<()>;

    /// `POST /api/invoices/{id}/restore`
    async fn restore_invoice(&self, id: &str) -> Result<()>;
}
