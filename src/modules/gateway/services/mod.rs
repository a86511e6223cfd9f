pub mod gateway_trait;
pub mod http_client;

pub use gateway_trait::InvoiceGateway;
pub use http_client::{HttpInvoiceClient, IDEMPOTENCY_KEY_HEADER};
