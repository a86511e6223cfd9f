pub mod invoice_view;
pub mod lifecycle_manager;
pub mod line_item_calculator;
pub mod status_resolver;

pub use invoice_view::{InvoiceView, SnapshotView, ViewTicket};
pub use lifecycle_manager::{CreatedInvoice, InvoiceLifecycleManager, ItemIdMap};
pub use line_item_calculator::LineItemCalculator;
pub use status_resolver::{StatusInputs, StatusResolver};
