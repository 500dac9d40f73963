//! The single entry point: one pass over every trader and quest.
//!
//! [`run`] borrows the caller's [`Dataset`] mutably, walks the trader table
//! then the quest table, and returns a [`TransformReport`]. Nothing is kept
//! after it returns. A currency lookup failure on one trader is logged and
//! recovered inside the pipeline, so the pass always completes.

use serde::Serialize;
use tracing::{debug, info, warn};
use traderqol_types::Dataset;

use crate::config::Configuration;
use crate::quest::transform_quest;
use crate::trader::transform_trader;

/// Nicknames of traders the pass never touches: the hideout caretaker,
/// the placeholder trader, and the armored transport vendor.
pub const EXCLUDED_TRADERS: [&str; 3] = ["caretaker", "Unknown", "БТР"];

/// Whether a trader with this nickname is skipped.
pub fn is_excluded(nickname: &str) -> bool {
    EXCLUDED_TRADERS.contains(&nickname)
}

/// Counts of what a pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Traders that went through the pipeline.
    pub traders_transformed: usize,
    /// Traders skipped by nickname.
    pub traders_excluded: usize,
    /// Traders whose own currency changed.
    pub traders_rebased: usize,
    /// Priced offers re-denominated into the target currency.
    pub offers_converted: usize,
    /// Priced offers scaled by the price multiplier.
    pub offers_repriced: usize,
    /// Stocked items whose metadata changed.
    pub items_restocked: usize,
    /// Currency conversions that fell back to the identity rate.
    pub conversion_fallbacks: usize,
    /// Quests visited.
    pub quests_transformed: usize,
    /// Finish conditions whose found-in-raid flag was rewritten.
    pub conditions_relaxed: usize,
    /// Trader standing rewards rescaled.
    pub rewards_scaled: usize,
}

/// Transform the whole dataset in place.
///
/// The configuration is already validated by construction, so the pass
/// itself cannot fail.
pub fn run(dataset: &mut Dataset, config: &Configuration) -> TransformReport {
    let mut report = TransformReport::default();

    info!(
        traders = dataset.traders.len(),
        quests = dataset.quests.len(),
        "Transform pass starting"
    );

    for (trader_id, trader) in &mut dataset.traders {
        if is_excluded(&trader.base.nickname) {
            debug!(%trader_id, nickname = %trader.base.nickname, "Trader excluded");
            report.traders_excluded = report.traders_excluded.saturating_add(1);
            continue;
        }

        let outcome = transform_trader(trader, config);
        report.traders_transformed = report.traders_transformed.saturating_add(1);
        if outcome.currency_changed {
            report.traders_rebased = report.traders_rebased.saturating_add(1);
        }
        report.offers_converted = report.offers_converted.saturating_add(outcome.offers_converted);
        report.offers_repriced = report.offers_repriced.saturating_add(outcome.offers_repriced);
        report.items_restocked = report.items_restocked.saturating_add(outcome.items_restocked);
        report.conversion_fallbacks = report
            .conversion_fallbacks
            .saturating_add(outcome.conversion_fallbacks);
    }

    for quest in dataset.quests.values_mut() {
        let outcome = transform_quest(quest, config);
        report.quests_transformed = report.quests_transformed.saturating_add(1);
        report.conditions_relaxed = report
            .conditions_relaxed
            .saturating_add(outcome.conditions_relaxed);
        report.rewards_scaled = report.rewards_scaled.saturating_add(outcome.rewards_scaled);
    }

    log_report(&report);
    report
}

/// Log the end-of-pass summary.
pub fn log_report(report: &TransformReport) {
    info!(
        traders_transformed = report.traders_transformed,
        traders_excluded = report.traders_excluded,
        traders_rebased = report.traders_rebased,
        offers_converted = report.offers_converted,
        offers_repriced = report.offers_repriced,
        items_restocked = report.items_restocked,
        quests_transformed = report.quests_transformed,
        conditions_relaxed = report.conditions_relaxed,
        rewards_scaled = report.rewards_scaled,
        "Transform pass complete"
    );

    if report.conversion_fallbacks > 0 {
        warn!(
            conversion_fallbacks = report.conversion_fallbacks,
            "Some traders used an unsupported currency and kept their thresholds"
        );
    }
}
