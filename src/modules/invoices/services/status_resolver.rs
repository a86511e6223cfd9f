use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::modules::invoices::models::{
    DisplayStatus, Invoice, InvoiceSummary, SettlementPolicy, StoredStatus,
};

/// The facts the display status is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInputs {
    pub status: StoredStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub total: Decimal,
    pub balance_due: Decimal,
}

impl From<&Invoice> for StatusInputs {
    fn from(invoice: &Invoice) -> Self {
        // Figures out of range never count as settled
        let (total, balance_due) = match (invoice.total(), invoice.balance_due()) {
            (Ok(total), Ok(balance_due)) => (total, balance_due),
            _ => (Decimal::ZERO, Decimal::ZERO),
        };

        Self {
            status: invoice.status,
            due_date: Some(invoice.due_date),
            total,
            balance_due,
        }
    }
}

impl From<&InvoiceSummary> for StatusInputs {
    fn from(summary: &InvoiceSummary) -> Self {
        Self {
            status: summary.status,
            due_date: summary.due_date,
            total: summary.total,
            balance_due: summary.balance_due,
        }
    }
}

/// Single source of the display-status rule. The archived flag is not an
/// input: archiving is a filter, not a status.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusResolver {
    policy: SettlementPolicy,
}

impl StatusResolver {
    pub fn new(policy: SettlementPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }

    /// First match wins:
    /// 1. stored PAID (or settled under the auto policy) → Paid
    /// 2. due date before `now` → Overdue
    /// 3. otherwise → Pending
    pub fn resolve(&self, inputs: impl Into<StatusInputs>, now: DateTime<Utc>) -> DisplayStatus {
        let inputs = inputs.into();

        if inputs.status == StoredStatus::Paid || self.is_settled(&inputs) {
            return DisplayStatus::Paid;
        }

        match inputs.due_date {
            Some(due_date) if due_date < now => DisplayStatus::Overdue,
            _ => DisplayStatus::Pending,
        }
    }

    fn is_settled(&self, inputs: &StatusInputs) -> bool {
        match self.policy {
            SettlementPolicy::Manual => false,
            SettlementPolicy::AutoOnZeroBalance => {
                inputs.total > Decimal::ZERO && inputs.balance_due <= Decimal::ZERO
            }
        }
    }
}
