use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::gateway_trait::InvoiceGateway;
use crate::config::ApiConfig;
use crate::core::{AppError, Result, Session};
use crate::modules::gateway::models::{
    CreateInvoiceRequest, InvoiceDocument, InvoiceEnvelope, InvoiceListEnvelope, PaymentRequest,
};

/// Header carrying the client-generated key of one payment attempt
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// reqwest client for the invoice API
///
/// All endpoints live under `{origin}/api/invoices`. The bearer token comes
/// from the [`Session`] given at construction, never from ambient state.
pub struct HttpInvoiceClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpInvoiceClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(client, &config.base_url, config.session())
    }

    /// Uses a caller-supplied reqwest client (custom timeouts, proxies)
    pub fn with_client(client: Client, origin: &str, session: Session) -> Result<Self> {
        let mut base_url = Url::parse(origin.trim()).map_err(|e| {
            AppError::Configuration(format!("Invalid invoice API origin {:?}: {}", origin, e))
        })?;

        base_url
            .path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("Invoice API origin {:?} cannot be a base", origin))
            })?
            .pop_if_empty()
            .extend(["api", "invoices"]);

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends once. Transport failures and non-2xx statuses become errors.
    async fn send(&self, action: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::warn!(action, error = %e, "Invoice API unreachable");
            AppError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(action, status = status.as_u16(), "Invoice API request succeeded");
            return Ok(response);
        }

        // Error bodies are best-effort; an unreadable one counts as empty
        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body)
            .unwrap_or_else(|| format!("{} failed ({})", action, status.as_u16()));

        tracing::warn!(
            action,
            status = status.as_u16(),
            message = %message,
            "Invoice API request failed"
        );

        Err(AppError::remote(message, status.as_u16()))
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>> {
    let bytes = response.bytes().await.map_err(AppError::Transport)?;
    Ok(bytes.to_vec())
}

/// `message` field of an error body, when present and non-empty
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| AppError::decode(e.to_string()))
}

#[async_trait]
impl InvoiceGateway for HttpInvoiceClient {
    async fn list_invoices(&self) -> Result<Vec<InvoiceDocument>> {
        let url = self.endpoint(&[]);
        tracing::debug!(%url, "Listing invoices");

        let response = self.send("Load invoices", self.client.get(url)).await?;
        let body = read_body(response).await?;

        match decode::<Vec<InvoiceDocument>>(&body) {
            Ok(invoices) => Ok(invoices),
            Err(bare_err) => decode::<InvoiceListEnvelope>(&body)
                .map(|envelope| envelope.invoices)
                .map_err(|_| bare_err),
        }
    }

    async fn get_invoice(&self, id: &str) -> Result<InvoiceDocument> {
        let url = self.endpoint(&[id]);
        tracing::debug!(invoice_id = id, "Fetching invoice");

        let response = self.send("Load invoice", self.client.get(url)).await?;
        let body = read_body(response).await?;

        match decode::<InvoiceDocument>(&body) {
            Ok(invoice) => Ok(invoice),
            Err(bare_err) => decode::<InvoiceEnvelope>(&body)
                .map(|envelope| envelope.invoice)
                .map_err(|_| bare_err),
        }
    }

    async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<String> {
        let url = self.endpoint(&[]);
        tracing::debug!(
            invoice_number = %request.invoice_number,
            items = request.items.len(),
            "Creating invoice"
        );

        let response = self
            .send("Create invoice", self.client.post(url).json(request))
            .await?;
        let body = read_body(response).await?;

        // The server has accepted the invoice by now
        let envelope: CreatedEnvelope = decode(&body).map_err(|e| {
            tracing::warn!(
                invoice_number = %request.invoice_number,
                error = %e,
                "Invoice may already exist; creation response could not be read"
            );
            e
        })?;
        Ok(envelope.invoice.id)
    }

    async fn add_payment(
        &self,
        id: &str,
        request: &PaymentRequest,
        idempotency_key: Uuid,
    ) -> Result<()> {
        let url = self.endpoint(&[id, "payments"]);
        tracing::debug!(
            invoice_id = id,
            amount = %request.amount,
            idempotency_key = %idempotency_key,
            "Submitting payment"
        );

        let builder = self
            .client
            .post(url)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(request);

        // The updated invoice in the body is ignored; callers refetch
        self.send("Add payment", builder).await?;
        Ok(())
    }

    async fn archive_invoice(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&[id, "archive"]);
        tracing::debug!(invoice_id = id, "Archiving invoice");

        self.send("Archive invoice", self.client.post(url)).await?;
        Ok(())
    }

    async fn restore_invoice(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&[id, "restore"]);
        tracing::debug!(invoice_id = id, "Restoring invoice");

        self.send("Restore invoice", self.client.post(url)).await?;
        Ok(())
    }
}

/// Only the new id is read from the creation response
#[derive(serde::Deserialize)]
struct CreatedEnvelope {
    invoice: CreatedInvoice,
}

#[derive(serde::Deserialize)]
struct CreatedInvoice {
    #[serde(alias = "_id")]
    id: String,
}
