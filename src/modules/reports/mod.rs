pub mod models;
pub mod services;

pub use models::{CurrencyTotals, DashboardSummary, RECENT_INVOICE_COUNT};
pub use services::{active_only, DashboardService};
