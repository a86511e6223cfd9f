mod payment_ledger;

pub use payment_ledger::PaymentLedger;
