//! Invoicely invoice domain library
//!
//! Invoice arithmetic, payment ledger, display-status rules and the
//! lifecycle manager that drives the remote invoice API.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::gateway;
pub use modules::invoices;
pub use modules::payments;
pub use modules::reports;
pub use modules::taxes;
