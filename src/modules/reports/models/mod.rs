mod dashboard_summary;

pub use dashboard_summary::{CurrencyTotals, DashboardSummary, RECENT_INVOICE_COUNT};
