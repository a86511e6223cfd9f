use std::env;
use std::time::Duration;

use crate::core::{AppError, Result, Session};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Invoice API connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin the `/api/invoices` path is appended to
    pub base_url: String,
    pub timeout_secs: u64,
    session: Session,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session: Session::anonymous(),
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("INVOICE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = env::var("INVOICE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid INVOICE_API_TIMEOUT_SECS".to_string()))?;

        let session = env::var("INVOICE_API_TOKEN")
            .map(Session::with_token)
            .unwrap_or_default();

        Ok(Self {
            base_url,
            timeout_secs,
            session,
        })
    }

    /// Credential threaded into the API client
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Invoice API timeout must be greater than 0".to_string(),
            ));
        }

        let origin = self.base_url.trim();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(AppError::Configuration(format!(
                "INVOICE_API_URL must be an http(s) origin, got: {:?}",
                self.base_url
            )));
        }

        Ok(())
    }
}
