//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock needed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopfront_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS};
use tracing::warn;

/// Default wait before a tracking lookup answers, in milliseconds.
pub const DEFAULT_TRACKING_DELAY_MS: u64 = 1000;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the shell banner and order confirmations)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Tax rate applied to the order summary, in basis points.
    /// e.g., 1000 = 10%
    pub tax_rate_bps: u32,

    /// Simulated search time of the order tracking page.
    pub tracking_delay_ms: u64,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Shopfront"
    /// - Currency: USD ($)
    /// - Tax: 10%
    /// - Tracking delay: 1s
    fn default() -> Self {
        ConfigState {
            store_name: "Shopfront".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            tracking_delay_ms: DEFAULT_TRACKING_DELAY_MS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_STORE_NAME`: Override store name
    /// - `SHOPFRONT_CURRENCY_SYMBOL`: Override currency symbol
    /// - `SHOPFRONT_TAX_RATE`: Tax rate in percent (e.g., "10" or "8.25")
    /// - `SHOPFRONT_TRACKING_DELAY_MS`: Tracking lookup delay
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    ///
    /// Unparseable values are logged and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("SHOPFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(tax_rate_str) = lookup("SHOPFRONT_TAX_RATE") {
            match tax_rate_str.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() && rate >= 0.0 => {
                    config.tax_rate_bps = TaxRate::from_percentage(rate).bps();
                }
                _ => warn!(value = %tax_rate_str, "ignoring invalid SHOPFRONT_TAX_RATE"),
            }
        }

        if let Some(delay_str) = lookup("SHOPFRONT_TRACKING_DELAY_MS") {
            match delay_str.trim().parse::<u64>() {
                Ok(delay) => config.tracking_delay_ms = delay,
                Err(_) => warn!(value = %delay_str, "ignoring invalid SHOPFRONT_TRACKING_DELAY_MS"),
            }
        }

        config
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn tracking_delay(&self) -> Duration {
        Duration::from_millis(self.tracking_delay_ms)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront::state::ConfigState;
    /// use shopfront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(|_| None);
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.tax_rate().bps(), 1000);
        assert_eq!(config.tracking_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("SHOPFRONT_STORE_NAME", "Lumen & Co"),
            ("SHOPFRONT_CURRENCY_SYMBOL", "€"),
            ("SHOPFRONT_TAX_RATE", "8.25"),
            ("SHOPFRONT_TRACKING_DELAY_MS", "0"),
        ]));

        assert_eq!(config.store_name, "Lumen & Co");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.tracking_delay_ms, 0);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("SHOPFRONT_TAX_RATE", "ten"),
            ("SHOPFRONT_TRACKING_DELAY_MS", "-5"),
        ]));

        assert_eq!(config.tax_rate_bps, DEFAULT_TAX_RATE_BPS);
        assert_eq!(config.tracking_delay_ms, DEFAULT_TRACKING_DELAY_MS);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::from_cents(-550)), "-$5.50");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }
}
