//! Shared record types for the TraderQoL economy transformer.
//!
//! These types mirror the trader and quest documents of the game database
//! closely enough to round-trip them: every record keeps the fields it does
//! not model in a flattened `extra` map, so a record the transformer leaves
//! alone serializes back exactly as it was read.
//!
//! # Modules
//!
//! - [`currency`] -- The closed set of trader currencies and their item templates
//! - [`trader`] -- Trader base, loyalty levels, assort items, and barter schemes
//! - [`quest`] -- Quest finish conditions and success rewards
//! - [`dataset`] -- The trader and quest tables handed to the transformer
//! - [`number`] -- Serde helpers that keep whole numbers written as integers

pub mod currency;
pub mod dataset;
pub mod number;
pub mod quest;
pub mod trader;

// Re-export all public types at crate root for convenience.
pub use currency::{
    Currency, DOLLAR_TEMPLATE_ID, EURO_TEMPLATE_ID, ROUBLE_TEMPLATE_ID, is_currency_item,
};
pub use dataset::Dataset;
pub use quest::{
    Quest, QuestCondition, QuestConditions, QuestReward, QuestRewards, RewardValue,
    TRADER_STANDING,
};
pub use trader::{
    Assort, AssortItem, BarterEntry, BarterItem, ItemUpd, LoyaltyLevel, ServiceAvailability,
    Trader, TraderBase,
};
