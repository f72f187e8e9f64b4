//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CRESCENT_PAGE_SIZE` - products per catalog page (default: 9)
//! - `CRESCENT_CURRENCY` - ISO 4217 display currency (default: INR)
//! - `CRESCENT_DEPARTMENT_TAG` - department shown on the shop listing
//!   (default: Electronics)
//! - `CRESCENT_SAVE_BILLING_DEFAULT` - whether the "save billing details"
//!   checkbox starts checked (default: false)
//!
//! Loading reads a `.env` file first when one exists.

use thiserror::Error;

use crescent_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Products per catalog page.
    pub page_size: usize,
    /// Display currency.
    pub currency: CurrencyCode,
    /// Department tag the shop listing is restricted to.
    pub department_tag: String,
    /// Initial state of the "save billing details" option at checkout.
    pub save_billing_default: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            currency: CurrencyCode::INR,
            department_tag: "Electronics".to_owned(),
            save_billing_default: false,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a set variable cannot be
    /// parsed (page size not a positive integer, unknown currency code).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(raw) = std::env::var("CRESCENT_PAGE_SIZE") {
            let parsed: usize = raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("CRESCENT_PAGE_SIZE".to_owned(), raw.clone())
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    "CRESCENT_PAGE_SIZE".to_owned(),
                    "must be at least 1".to_owned(),
                ));
            }
            config.page_size = parsed;
        }

        if let Ok(raw) = std::env::var("CRESCENT_CURRENCY") {
            config.currency = raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("CRESCENT_CURRENCY".to_owned(), e))?;
        }

        if let Ok(raw) = std::env::var("CRESCENT_DEPARTMENT_TAG") {
            config.department_tag = raw;
        }

        if let Ok(raw) = std::env::var("CRESCENT_SAVE_BILLING_DEFAULT") {
            config.save_billing_default = matches!(raw.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
