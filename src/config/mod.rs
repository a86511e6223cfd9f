use crate::core::{AppError, Currency, Result, DEFAULT_CURRENCY};
use crate::modules::invoices::models::{
    InvoiceDraft, SettlementPolicy, DEFAULT_PAYMENT_TERMS_DAYS,
};
use chrono::{DateTime, Utc};
use std::env;

pub mod api;

pub use api::ApiConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub billing: BillingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Invoice defaults and display rules
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub settlement_policy: SettlementPolicy,
    pub default_currency: String,
    pub payment_terms_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            settlement_policy: SettlementPolicy::default(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
        }
    }
}

impl BillingConfig {
    /// Blank invoice form using the configured payment terms and currency
    pub fn new_draft(&self, now: DateTime<Utc>) -> InvoiceDraft {
        InvoiceDraft::starting_at(now, self.payment_terms_days, &self.default_currency)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_default()
                    .parse()
                    .map_err(AppError::Configuration)?,
            },
            api: ApiConfig::from_env()?,
            billing: BillingConfig {
                settlement_policy: env::var("SETTLEMENT_POLICY")
                    .unwrap_or_else(|_| "manual".to_string())
                    .parse()
                    .map_err(AppError::Configuration)?,
                default_currency: env::var("DEFAULT_CURRENCY")
                    .map(|code| code.trim().to_uppercase())
                    .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string()),
                payment_terms_days: env::var("PAYMENT_TERMS_DAYS")
                    .unwrap_or_else(|_| DEFAULT_PAYMENT_TERMS_DAYS.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid PAYMENT_TERMS_DAYS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;

        if self.billing.payment_terms_days == 0 {
            return Err(AppError::Configuration(
                "Payment terms must be greater than 0 days".to_string(),
            ));
        }

        if self.billing.default_currency.parse::<Currency>().is_err() {
            tracing::warn!(
                currency = %self.billing.default_currency,
                "Default currency is not recognized; amounts will use the fallback format"
            );
        }

        Ok(())
    }
}
