// Invoices module

pub mod models;
pub mod services;

pub use models::{
    DisplayStatus, Invoice, InvoiceDraft, InvoiceSummary, LineItem, NewInvoice, Payment,
    SettlementPolicy, StatusLabels, StoredStatus,
};
pub use services::{InvoiceLifecycleManager, InvoiceView, LineItemCalculator, StatusResolver};
