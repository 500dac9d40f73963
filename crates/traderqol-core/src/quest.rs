//! The per-quest adjustment pass.
//!
//! Two independent adjustments:
//!
//! - **Requirement relaxation** rewrites every finish condition that demands
//!   found-in-raid items to `!removeFoundInRaidRequirement`.
//! - **Reputation scaling** multiplies trader standing rewards and rounds the
//!   result up to the next hundredth, in the player's favour.
//!
//! The rounding is done in [`Decimal`] so a reward of `0.07` scales from
//! exactly `0.07`, not from its binary expansion.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};
use traderqol_types::{Quest, RewardValue};

use crate::config::{Configuration, Multiplier, QuestReputationSettings};

/// Decimal places kept on a scaled reputation reward.
const STANDING_DECIMAL_PLACES: u32 = 2;

/// What one quest's pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestOutcome {
    /// Finish conditions whose found-in-raid flag was rewritten.
    pub conditions_relaxed: usize,
    /// Trader standing rewards that were rescaled.
    pub rewards_scaled: usize,
}

/// Run both adjustments over one quest, mutating it in place.
pub fn transform_quest(quest: &mut Quest, config: &Configuration) -> QuestOutcome {
    let mut outcome = QuestOutcome::default();

    let requirements = &config.quest_requirement_settings;
    if requirements.enabled {
        let keep_requirement = !requirements.remove_found_in_raid_requirement;
        for condition in quest.finish_conditions_mut() {
            if condition.only_found_in_raid == Some(true) {
                condition.only_found_in_raid = Some(keep_requirement);
                outcome.conditions_relaxed = outcome.conditions_relaxed.saturating_add(1);
            }
        }
    }

    let reputation = &config.quest_reputation_settings;
    if reputation.enabled && !reputation.rep_multiplier.is_noop() {
        outcome.rewards_scaled = scale_standing_rewards(quest, reputation);
    }

    outcome
}

/// Rescale every trader standing success reward. Returns how many changed.
fn scale_standing_rewards(quest: &mut Quest, settings: &QuestReputationSettings) -> usize {
    let mut scaled = 0_usize;

    for reward in quest
        .success_rewards_mut()
        .iter_mut()
        .filter(|r| r.is_trader_standing())
    {
        let Some(current) = reward.value.as_ref().and_then(RewardValue::as_f64) else {
            warn!(value = ?reward.value, "Trader standing reward has no numeric value, skipping");
            continue;
        };
        if current < 0.0 && !settings.multiply_negative_reputation_rewards {
            continue;
        }
        let Some(next) = scale_standing(current, settings.rep_multiplier) else {
            warn!(value = current, "Trader standing reward could not be scaled, skipping");
            continue;
        };
        debug!(from = current, to = next, "Trader standing reward scaled");
        reward.value = Some(RewardValue::Number(next));
        scaled = scaled.saturating_add(1);
    }

    scaled
}

/// `ceil(value * multiplier * 100) / 100`, computed in decimal.
///
/// Returns `None` for values that have no decimal form (NaN, infinities,
/// magnitudes beyond `Decimal`).
pub fn scale_standing(value: f64, multiplier: Multiplier) -> Option<f64> {
    let value = to_decimal(value)?;
    let multiplier = to_decimal(multiplier.value())?;
    value
        .checked_mul(multiplier)?
        .round_dp_with_strategy(STANDING_DECIMAL_PLACES, RoundingStrategy::ToPositiveInfinity)
        .to_f64()
}

/// Convert through the shortest round-trip text, so `0.07` stays `0.07`.
fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    value.to_string().parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::Map;
    use traderqol_types::{
        QuestCondition, QuestConditions, QuestReward, QuestRewards, TRADER_STANDING,
    };

    use super::*;
    use crate::config::QuestRequirementSettings;

    fn standing(value: f64) -> QuestReward {
        QuestReward {
            reward_type: TRADER_STANDING.to_owned(),
            value: Some(RewardValue::Number(value)),
            extra: Map::new(),
        }
    }

    fn condition(only_found_in_raid: Option<bool>) -> QuestCondition {
        QuestCondition {
            only_found_in_raid,
            extra: Map::new(),
        }
    }

    fn quest_with(conditions: Vec<QuestCondition>, rewards: Vec<QuestReward>) -> Quest {
        Quest {
            conditions: Some(QuestConditions {
                available_for_finish: Some(conditions),
                extra: Map::new(),
            }),
            rewards: Some(QuestRewards {
                success: Some(rewards),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    fn make_quest() -> Quest {
        quest_with(
            vec![condition(Some(true)), condition(Some(false)), condition(None)],
            vec![
                QuestReward {
                    reward_type: "Experience".to_owned(),
                    value: Some(RewardValue::Number(1700.0)),
                    extra: Map::new(),
                },
                standing(0.07),
                standing(-0.05),
            ],
        )
    }

    fn reputation(multiplier: f64, negatives: bool) -> Configuration {
        Configuration {
            quest_reputation_settings: QuestReputationSettings {
                enabled: true,
                rep_multiplier: Multiplier::new(multiplier),
                multiply_negative_reputation_rewards: negatives,
            },
            ..Configuration::default()
        }
    }

    fn reward_values(quest: &Quest) -> Vec<Option<f64>> {
        quest
            .success_rewards()
            .iter()
            .map(|r| r.value.as_ref().and_then(RewardValue::as_f64))
            .collect()
    }

    #[test]
    fn standing_rounds_up_to_hundredths() {
        assert_eq!(scale_standing(0.07, Multiplier::new(1.23)), Some(0.09));
        assert_eq!(scale_standing(0.1, Multiplier::new(1.5)), Some(0.15));
        assert_eq!(scale_standing(0.2, Multiplier::new(1.5)), Some(0.3));
        assert_eq!(scale_standing(0.01, Multiplier::new(1.01)), Some(0.02));
    }

    #[test]
    fn negative_standing_rounds_toward_zero() {
        // ceil(-6.15) = -6
        assert_eq!(scale_standing(-0.05, Multiplier::new(1.23)), Some(-0.06));
        assert_eq!(scale_standing(-0.1, Multiplier::new(1.55)), Some(-0.15));
    }

    #[test]
    fn non_finite_standing_is_rejected() {
        assert_eq!(scale_standing(f64::NAN, Multiplier::new(2.0)), None);
        assert_eq!(scale_standing(0.1, Multiplier::new(f64::INFINITY)), None);
    }

    #[test]
    fn positive_rewards_scale_and_negatives_are_kept() {
        let mut quest = make_quest();
        let outcome = transform_quest(&mut quest, &reputation(1.23, false));
        assert_eq!(
            reward_values(&quest),
            vec![Some(1700.0), Some(0.09), Some(-0.05)]
        );
        assert_eq!(outcome.rewards_scaled, 1);
    }

    #[test]
    fn negatives_scale_when_enabled() {
        let mut quest = make_quest();
        let outcome = transform_quest(&mut quest, &reputation(2.0, true));
        assert_eq!(
            reward_values(&quest),
            vec![Some(1700.0), Some(0.14), Some(-0.1)]
        );
        assert_eq!(outcome.rewards_scaled, 2);
    }

    #[test]
    fn identity_multiplier_leaves_rewards_alone() {
        let mut quest = make_quest();
        let before = quest.clone();
        let outcome = transform_quest(&mut quest, &reputation(1.0, true));
        assert_eq!(quest, before);
        assert_eq!(outcome.rewards_scaled, 0);
    }

    #[test]
    fn text_reward_values_are_rewritten_as_numbers() {
        let mut quest = quest_with(
            Vec::new(),
            vec![QuestReward {
                reward_type: TRADER_STANDING.to_owned(),
                value: Some(RewardValue::Text("0.05".to_owned())),
                extra: Map::new(),
            }],
        );
        transform_quest(&mut quest, &reputation(2.0, false));
        assert_eq!(
            quest.success_rewards().first().and_then(|r| r.value.clone()),
            Some(RewardValue::Number(0.1))
        );
    }

    #[test]
    fn unreadable_reward_value_is_skipped() {
        let mut quest = quest_with(
            Vec::new(),
            vec![QuestReward {
                reward_type: TRADER_STANDING.to_owned(),
                value: None,
                extra: Map::new(),
            }],
        );
        let before = quest.clone();
        let outcome = transform_quest(&mut quest, &reputation(2.0, true));
        assert_eq!(quest, before);
        assert_eq!(outcome.rewards_scaled, 0);
    }

    #[test]
    fn quest_without_groups_is_left_sparse() {
        let config = Configuration {
            quest_requirement_settings: QuestRequirementSettings {
                enabled: true,
                remove_found_in_raid_requirement: true,
            },
            ..reputation(2.0, true)
        };
        let mut quest = Quest::default();
        let outcome = transform_quest(&mut quest, &config);
        assert_eq!(quest, Quest::default());
        assert_eq!(outcome, QuestOutcome::default());
    }

    #[test]
    fn disabled_reputation_does_nothing() {
        let mut config = reputation(2.0, true);
        config.quest_reputation_settings.enabled = false;
        let mut quest = make_quest();
        let before = quest.clone();
        transform_quest(&mut quest, &config);
        assert_eq!(quest, before);
    }

    #[test]
    fn removing_found_in_raid_clears_only_required_conditions() {
        let config = Configuration {
            quest_requirement_settings: QuestRequirementSettings {
                enabled: true,
                remove_found_in_raid_requirement: true,
            },
            ..Configuration::default()
        };
        let mut quest = make_quest();
        let outcome = transform_quest(&mut quest, &config);

        let flags: Vec<Option<bool>> = quest
            .finish_conditions()
            .iter()
            .map(|c| c.only_found_in_raid)
            .collect();
        assert_eq!(flags, vec![Some(false), Some(false), None]);
        assert_eq!(outcome.conditions_relaxed, 1);
    }

    #[test]
    fn keeping_found_in_raid_changes_nothing() {
        let config = Configuration {
            quest_requirement_settings: QuestRequirementSettings {
                enabled: true,
                remove_found_in_raid_requirement: false,
            },
            ..Configuration::default()
        };
        let mut quest = make_quest();
        let before = quest.clone();
        transform_quest(&mut quest, &config);
        assert_eq!(quest, before);
    }
}
