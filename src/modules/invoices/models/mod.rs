mod draft;
mod invoice;
mod line_item;
mod new_invoice;
mod payment;
mod status;

pub use draft::{DraftItem, InvoiceDraft, ItemEdit, LocalItemId, DEFAULT_PAYMENT_TERMS_DAYS};
pub use invoice::{Invoice, InvoiceSummary, StoredStatus};
pub use line_item::{LineItem, LineItemInput, UNTITLED_ITEM};
pub use new_invoice::NewInvoice;
pub use payment::Payment;
pub use status::{DisplayStatus, SettlementPolicy, StatusLabels};
