//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--tax-rate`)
//! 2. Environment variables (`SHOP_*`)
//! 3. Config file (`shop.toml`)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # shop.toml
//! store_name = "Corner Shop"
//! currency_symbol = "$"
//! tax_rate_bps = 800        # 8%
//! shipping_label = "Free"
//! ```
//!
//! Configuration is read-only once the session starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shop_core::{Money, PricingConfig, TaxRate, DEFAULT_TAX_RATE_BPS};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Store name (shown in the shell banner)
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Currency symbol prefixed to every amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Sales tax in basis points, applied to the discounted total.
    /// e.g., 800 = 8%
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// What the order summary shows on the shipping row
    #[serde(default = "default_shipping_label")]
    pub shipping_label: String,
}

fn default_store_name() -> String {
    "Shopfront".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_shipping_label() -> String {
    "Free".to_string()
}

impl Default for ShopConfig {
    /// ## Default Values
    /// - Store: "Shopfront"
    /// - Currency: `$`
    /// - Tax: 8%
    /// - Shipping: "Free"
    fn default() -> Self {
        ShopConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            tax_rate_bps: default_tax_rate_bps(),
            shipping_label: default_shipping_label(),
        }
    }
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or `shop.toml` in the platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shop config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shop config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.currency_symbol.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        shop_core::validation::validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `SHOP_STORE_NAME`: Override store name
    /// - `SHOP_CURRENCY_SYMBOL`: Override currency symbol
    /// - `SHOP_TAX_RATE`: Override tax rate as a percentage (e.g., "8.25")
    ///
    /// The lookup is injected so tests don't touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("SHOP_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("SHOP_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(rate) = lookup("SHOP_TAX_RATE") {
            match TaxRate::parse_percentage(&rate) {
                Ok(parsed) => {
                    debug!(tax_rate = %parsed, "Overriding tax rate from environment");
                    self.tax_rate_bps = parsed.bps();
                }
                Err(e) => warn!(value = %rate, error = %e, "Ignoring invalid SHOP_TAX_RATE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shop")
            .map(|dirs| dirs.config_dir().join("shop.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Returns the pricing configuration handed to the cart.
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig::with_tax_rate(self.tax_rate())
    }

    /// Formats an amount as a currency string, rounded to two places.
    ///
    /// ## Example
    /// ```rust
    /// use shop_cli_lib::state::ShopConfig;
    /// use shop_core::Money;
    ///
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}
