// Invoice API client

pub mod models;
pub mod services;

pub use models::{CreateInvoiceRequest, InvoiceDocument, PaymentRequest};
pub use services::{HttpInvoiceClient, InvoiceGateway, IDEMPOTENCY_KEY_HEADER};
