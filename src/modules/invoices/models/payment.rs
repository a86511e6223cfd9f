use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A payment recorded against an invoice. Append-only: never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Server-assigned identifier
    pub id: String,

    /// Positive amount in the invoice currency
    pub amount: Decimal,

    /// Server-assigned timestamp; older records may lack one
    pub payment_date: Option<DateTime<Utc>>,
}
