//! Quest records.
//!
//! Only two corners of a quest matter to the transformer: the conditions
//! checked when the quest is handed in, and the rewards paid on success.
//! Both may be missing from a document, and stay missing when written back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reward type of a trader reputation change.
pub const TRADER_STANDING: &str = "TraderStanding";

/// A quest template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    /// Conditions grouped by the quest phase that checks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<QuestConditions>,

    /// Rewards grouped by quest outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<QuestRewards>,

    /// Unmodelled quest fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quest {
    /// Conditions checked on hand-in, empty when the document has none.
    pub fn finish_conditions(&self) -> &[QuestCondition] {
        self.conditions
            .as_ref()
            .and_then(|c| c.available_for_finish.as_deref())
            .unwrap_or_default()
    }

    /// Mutable hand-in conditions.
    pub fn finish_conditions_mut(&mut self) -> &mut [QuestCondition] {
        self.conditions
            .as_mut()
            .and_then(|c| c.available_for_finish.as_deref_mut())
            .unwrap_or_default()
    }

    /// Rewards paid on success, empty when the document has none.
    pub fn success_rewards(&self) -> &[QuestReward] {
        self.rewards
            .as_ref()
            .and_then(|r| r.success.as_deref())
            .unwrap_or_default()
    }

    /// Mutable success rewards.
    pub fn success_rewards_mut(&mut self) -> &mut [QuestReward] {
        self.rewards
            .as_mut()
            .and_then(|r| r.success.as_deref_mut())
            .unwrap_or_default()
    }
}

/// Quest conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConditions {
    /// Conditions that must hold to finish the quest.
    #[serde(
        rename = "AvailableForFinish",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_for_finish: Option<Vec<QuestCondition>>,

    /// Other condition groups (`AvailableForStart`, `Fail`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single quest condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestCondition {
    /// Whether handed-in items must have been found in raid.
    #[serde(
        rename = "onlyFoundInRaid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub only_found_in_raid: Option<bool>,

    /// Unmodelled condition fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Quest rewards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    /// Rewards paid when the quest succeeds.
    #[serde(rename = "Success", default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Vec<QuestReward>>,

    /// Other reward groups (`Started`, `Fail`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single quest reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestReward {
    /// Reward kind, e.g. [`TRADER_STANDING`] or `"Experience"`.
    #[serde(rename = "type")]
    pub reward_type: String,

    /// Reward amount, when the kind has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RewardValue>,

    /// Unmodelled reward fields (`target`, `items`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestReward {
    /// Whether this reward changes trader reputation.
    pub fn is_trader_standing(&self) -> bool {
        self.reward_type == TRADER_STANDING
    }
}

/// A reward amount. Older quest files store some amounts as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewardValue {
    /// A JSON number.
    Number(#[serde(with = "crate::number")] f64),
    /// A numeric string such as `"0.02"`.
    Text(String),
}

impl RewardValue {
    /// The amount as a number, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}
