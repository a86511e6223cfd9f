mod dashboard_service;

pub use dashboard_service::{active_only, DashboardService};
