mod totals;

pub use totals::InvoiceTotals;
