use serde::Serialize;

/// Derived status shown to users, distinct from the persisted [`StoredStatus`].
///
/// [`StoredStatus`]: super::StoredStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayStatus {
    /// Not yet persisted (form preview)
    Draft,
    /// Open and not past its due date
    Pending,
    Paid,
    /// Open and past its due date
    Overdue,
}

/// Label set chosen by the presenting screen. The computed status is the same
/// everywhere; only the wording for an open invoice differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLabels {
    pub draft: &'static str,
    pub pending: &'static str,
    pub paid: &'static str,
    pub overdue: &'static str,
}

impl StatusLabels {
    /// Lists and dashboards
    pub const LEDGER: StatusLabels = StatusLabels {
        draft: "DRAFT",
        pending: "PENDING",
        paid: "PAID",
        overdue: "OVERDUE",
    };

    /// Invoice document and detail badge, where an open invoice reads as a draft
    pub const DOCUMENT: StatusLabels = StatusLabels {
        draft: "DRAFT",
        pending: "DRAFT",
        paid: "PAID",
        overdue: "OVERDUE",
    };

    pub fn label(&self, status: DisplayStatus) -> &'static str {
        match status {
            DisplayStatus::Draft => self.draft,
            DisplayStatus::Pending => self.pending,
            DisplayStatus::Paid => self.paid,
            DisplayStatus::Overdue => self.overdue,
        }
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        StatusLabels::LEDGER
    }
}

/// Whether a fully paid balance counts as paid for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlementPolicy {
    /// Only the stored status decides PAID
    #[default]
    Manual,
    /// A positive total with zero balance due displays as PAID
    AutoOnZeroBalance,
}

impl std::str::FromStr for SettlementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(SettlementPolicy::Manual),
            "auto" | "auto_on_zero_balance" => Ok(SettlementPolicy::AutoOnZeroBalance),
            _ => Err(format!("Invalid settlement policy: {}", s)),
        }
    }
}
