// Payments module

pub mod services;

pub use services::PaymentLedger;
