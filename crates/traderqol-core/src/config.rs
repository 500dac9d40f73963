//! Configuration loading and typed config structures for TraderQoL.
//!
//! The settings document is `config/config.jsonc`: plain JSON that may carry
//! `//` and `/* */` comments. This module defines strongly-typed structs that
//! mirror the document and a loader that strips comments and parses it.
//!
//! Unlike most config files in this workspace, every option is required.
//! A document missing an option is rejected before any record is touched,
//! so a partial config can never half-apply.

use std::path::Path;

use json_comments::StripComments;
use serde::{Deserialize, Serialize};
use traderqol_types::Currency;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse the document, or a required option is missing.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON parse error.
        source: serde_json::Error,
    },

    /// An exchange rate that would make conversion divide by zero or
    /// produce non-finite prices.
    #[error("exchange rate must be a positive finite number, got {value}")]
    InvalidExchangeRate {
        /// The rejected rate.
        value: f64,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A scaling factor applied to a dataset field.
///
/// Exactly `1.0` is the no-op sentinel: the mutation it controls is skipped
/// entirely rather than applied as a multiplication by one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(f64);

impl Multiplier {
    /// The no-op multiplier.
    pub const IDENTITY: Self = Self(1.0);

    /// Wrap a raw factor.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw factor.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this is exactly `1.0`.
    pub const fn is_noop(self) -> bool {
        self.0.to_bits() == 1.0_f64.to_bits()
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Roubles per unit of a foreign currency. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// One rouble per unit.
    pub const PARITY: Self = Self(1.0);

    /// Validate a raw rate.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidExchangeRate { value })
        }
    }

    /// Roubles per unit.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ExchangeRate {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for f64 {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Top-level transformer configuration.
///
/// Mirrors `config/config.jsonc`. Constructed once per run and passed by
/// reference into every transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Scales every currency-priced offer.
    pub price_multiplier: Multiplier,

    /// Scales the sales threshold of every loyalty level.
    pub min_sales_multiplier: Multiplier,

    /// Scales stocked quantities.
    pub trader_stock_multiplier: Multiplier,

    /// Marks stock as never running out and lifts purchase limits.
    pub unlimited_trader_stock: bool,

    /// Scales per-player purchase limits.
    pub trader_buy_restriction_multiplier: Multiplier,

    /// Consolidation of all traders into one currency.
    pub single_currency_settings: SingleCurrencySettings,

    /// Scaling of reputation rewards.
    pub quest_reputation_settings: QuestReputationSettings,

    /// Relaxation of quest hand-in requirements.
    pub quest_requirement_settings: QuestRequirementSettings,

    /// Scaling of insurance prices.
    pub insurance_settings: InsuranceSettings,

    /// Scaling of repair prices.
    pub repair_settings: RepairSettings,
}

impl Configuration {
    /// Load configuration from a JSON-with-comments file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] if the content is not a complete, valid
    /// settings document.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a JSON-with-comments string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the string is not a complete, valid
    /// settings document.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(StripComments::new(text.as_bytes()))?;
        Ok(config)
    }
}

/// Single-currency consolidation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleCurrencySettings {
    /// Whether consolidation runs at all.
    pub enabled: bool,

    /// Currency every trader ends up dealing in.
    pub target_currency: Currency,

    /// Roubles per dollar.
    pub dollar_exchange_rate: ExchangeRate,

    /// Roubles per euro.
    pub euro_exchange_rate: ExchangeRate,
}

impl Default for SingleCurrencySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            target_currency: Currency::Rub,
            dollar_exchange_rate: ExchangeRate::PARITY,
            euro_exchange_rate: ExchangeRate::PARITY,
        }
    }
}

/// Reputation reward scaling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestReputationSettings {
    /// Whether reputation rewards are scaled.
    pub enabled: bool,

    /// Factor applied to each trader standing reward.
    pub rep_multiplier: Multiplier,

    /// Whether reputation penalties are scaled too.
    pub multiply_negative_reputation_rewards: bool,
}

/// Quest hand-in requirement settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRequirementSettings {
    /// Whether requirements are rewritten.
    pub enabled: bool,

    /// Whether found-in-raid requirements are dropped.
    pub remove_found_in_raid_requirement: bool,
}

/// Insurance price settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceSettings {
    /// Whether insurance prices are scaled.
    pub enabled: bool,

    /// Factor applied to each loyalty level's insurance coefficient.
    pub insurance_cost_multiplier: Multiplier,
}

/// Repair price settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairSettings {
    /// Whether repair prices are scaled.
    pub enabled: bool,

    /// Factor applied to each loyalty level's repair coefficient.
    pub repair_cost_multiplier: Multiplier,
}
