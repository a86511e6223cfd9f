pub mod gateway;
pub mod invoices;
pub mod payments;
pub mod reports;
pub mod taxes;
