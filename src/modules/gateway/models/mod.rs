mod payloads;

pub use payloads::{
    CreateInvoiceRequest, CreateLineItem, InvoiceDocument, LineItemDocument, PaymentDocument,
    PaymentRequest,
};
pub(crate) use payloads::{InvoiceEnvelope, InvoiceListEnvelope};
