//! Configuration, currency conversion, and the transform pass for TraderQoL.
//!
//! This crate owns the logic: given a [`Dataset`] and a [`Configuration`],
//! [`run`] rewrites prices, stock, loyalty thresholds, service costs, and
//! quest rewards in place. It never reads or writes storage; loading the
//! database and the settings file is left to the caller.
//!
//! # Modules
//!
//! - [`config`] -- Settings document loading into strongly-typed structs.
//! - [`conversion`] -- Exchange rates between RUB, USD, and EUR via the
//!   rouble hub.
//! - [`trader`] -- The six-step per-trader mutation pipeline.
//! - [`quest`] -- Found-in-raid relaxation and reputation reward scaling.
//! - [`transform`] -- The [`run`] entry point, trader exclusion, and the
//!   pass report.
//!
//! [`Dataset`]: traderqol_types::Dataset

pub mod config;
pub mod conversion;
pub mod quest;
pub mod trader;
pub mod transform;

pub use config::{ConfigError, Configuration, ExchangeRate, Multiplier};
pub use conversion::{ConversionError, exchange_rate, exchange_rate_from_code};
pub use quest::{QuestOutcome, transform_quest};
pub use trader::{TraderOutcome, transform_trader};
pub use transform::{EXCLUDED_TRADERS, TransformReport, is_excluded, run};
