use crate::core::{AppError, Currency, Result};
use crate::modules::exchange_rates::services::{validate_exchange_rate, StaticRateSource};
use crate::modules::invoices::services::{InvoiceDefaults, DEFAULT_INVOICE_NUMBER_PATTERN};
use std::env;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub invoicing: InvoicingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct InvoicingConfig {
    pub source_currency: Currency,
    pub target_currency: Currency,
    pub invoice_number_pattern: String,
    pub exchange_rates: StaticRateSource,
}

impl InvoicingConfig {
    pub fn defaults(&self) -> InvoiceDefaults {
        InvoiceDefaults {
            source_currency: self.source_currency,
            target_currency: self.target_currency,
            number_pattern: self.invoice_number_pattern.clone(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let currency = |key: &str, default: Currency| -> Result<Currency> {
            match var(key) {
                Some(code) => code
                    .parse()
                    .map_err(|e: String| AppError::Configuration(format!("{}: {}", key, e))),
                None => Ok(default),
            }
        };

        let config = Config {
            app: AppConfig {
                env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
            server: ServerConfig::from_vars(&var)?,
            invoicing: InvoicingConfig {
                source_currency: currency("DEFAULT_SOURCE_CURRENCY", Currency::USD)?,
                target_currency: currency("DEFAULT_TARGET_CURRENCY", Currency::GHS)?,
                invoice_number_pattern: var("INVOICE_NUMBER_PATTERN")
                    .unwrap_or_else(|| DEFAULT_INVOICE_NUMBER_PATTERN.to_string()),
                exchange_rates: StaticRateSource::parse(
                    &var("EXCHANGE_RATES").unwrap_or_default(),
                )?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        if self.invoicing.invoice_number_pattern.trim().is_empty() {
            return Err(AppError::Configuration(
                "Invoice number pattern cannot be empty".to_string(),
            ));
        }

        for ((from, to), rate) in self.invoicing.exchange_rates.rates() {
            validate_exchange_rate(*rate).map_err(|e| {
                AppError::Configuration(format!("EXCHANGE_RATES {}/{}: {}", from, to, e))
            })?;
        }

        Ok(())
    }
}
