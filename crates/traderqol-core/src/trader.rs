//! The per-trader mutation pipeline.
//!
//! [`transform_trader`] applies six steps, in this order, each behind its own
//! toggle or no-op sentinel:
//!
//! 1. Currency consolidation (loyalty thresholds, trader currency, priced offers)
//! 2. Minimum-sales scaling
//! 3. Price scaling
//! 4. Stock and buy-restriction scaling
//! 5. Insurance cost scaling
//! 6. Repair cost scaling
//!
//! Order matters: minimum-sales scaling compounds on a threshold that step 1
//! has already converted, and price scaling multiplies converted prices.
//!
//! Multi-item barter entries are never touched by any step; only entries
//! consisting of a single currency item count as prices.

use tracing::{debug, warn};
use traderqol_types::{Assort, AssortItem, LoyaltyLevel, Trader};

use crate::config::{Configuration, Multiplier, SingleCurrencySettings};
use crate::conversion;

/// What one trader's pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraderOutcome {
    /// Whether the trader's own currency was switched to the target.
    pub currency_changed: bool,
    /// Priced offers re-denominated into the target currency.
    pub offers_converted: usize,
    /// Conversions that fell back to the identity rate.
    pub conversion_fallbacks: usize,
    /// Priced offers scaled by the price multiplier.
    pub offers_repriced: usize,
    /// Stocked items whose metadata changed.
    pub items_restocked: usize,
}

/// Run the pipeline over one trader, mutating it in place.
///
/// Running it twice compounds every active multiplier; the pass is meant
/// to run once per database load.
pub fn transform_trader(trader: &mut Trader, config: &Configuration) -> TraderOutcome {
    let mut outcome = TraderOutcome::default();

    if config.single_currency_settings.enabled {
        consolidate_currency(trader, &config.single_currency_settings, &mut outcome);
    }

    if !config.min_sales_multiplier.is_noop() {
        scale_levels(
            trader.base.loyalty_levels_mut(),
            |level| &mut level.min_sales_sum,
            config.min_sales_multiplier,
        );
    }

    if !config.price_multiplier.is_noop() {
        let factor = config.price_multiplier.value();
        for item in trader.assort.iter_mut().flat_map(Assort::priced_offers_mut) {
            item.count *= factor;
            outcome.offers_repriced = outcome.offers_repriced.saturating_add(1);
        }
    }

    if !config.trader_stock_multiplier.is_noop()
        || !config.trader_buy_restriction_multiplier.is_noop()
        || config.unlimited_trader_stock
    {
        if let Some(assort) = trader.assort.as_mut() {
            outcome.items_restocked = scale_stock(assort.items_mut(), config);
        }
    }

    let insurance = &config.insurance_settings;
    if trader.base.offers_insurance()
        && insurance.enabled
        && !insurance.insurance_cost_multiplier.is_noop()
    {
        scale_levels(
            trader.base.loyalty_levels_mut(),
            |level| &mut level.insurance_price_coef,
            insurance.insurance_cost_multiplier,
        );
    }

    let repair = &config.repair_settings;
    if trader.base.offers_repair() && repair.enabled && !repair.repair_cost_multiplier.is_noop() {
        scale_levels(
            trader.base.loyalty_levels_mut(),
            |level| &mut level.repair_price_coef,
            repair.repair_cost_multiplier,
        );
    }

    debug!(
        trader = %trader.base.nickname,
        currency_changed = outcome.currency_changed,
        offers_converted = outcome.offers_converted,
        offers_repriced = outcome.offers_repriced,
        items_restocked = outcome.items_restocked,
        "Trader transformed"
    );

    outcome
}

/// Move the trader and every priced offer onto the target currency.
fn consolidate_currency(
    trader: &mut Trader,
    settings: &SingleCurrencySettings,
    outcome: &mut TraderOutcome,
) {
    let target = settings.target_currency;

    if trader.base.currency != target.code() {
        let rate =
            match conversion::exchange_rate_from_code(&trader.base.currency, target, settings) {
                Ok(rate) => rate,
                Err(err) => {
                    warn!(
                        trader = %trader.base.nickname,
                        target = %target,
                        %err,
                        "Currency conversion failed, using identity rate"
                    );
                    outcome.conversion_fallbacks = outcome.conversion_fallbacks.saturating_add(1);
                    1.0
                }
            };

        for level in trader.base.loyalty_levels_mut() {
            level.min_sales_sum *= rate;
        }
        trader.base.currency = target.code().to_owned();
        outcome.currency_changed = true;
    }

    for item in trader.assort.iter_mut().flat_map(Assort::priced_offers_mut) {
        let Some(currency) = item.currency() else {
            continue;
        };
        if currency == target {
            continue;
        }
        let rate = conversion::exchange_rate(currency, target, settings);
        item.count = round_at_least_one(item.count * rate);
        target.template_id().clone_into(&mut item.template_id);
        outcome.offers_converted = outcome.offers_converted.saturating_add(1);
    }
}

/// Apply the three independent stock gates to every item with metadata.
///
/// Returns the number of items changed.
fn scale_stock(items: &mut [AssortItem], config: &Configuration) -> usize {
    let restriction = config.trader_buy_restriction_multiplier;
    let stock = config.trader_stock_multiplier;
    let mut changed_items = 0_usize;

    for upd in items.iter_mut().filter_map(|item| item.upd.as_mut()) {
        let mut changed = false;

        if !restriction.is_noop() {
            if let Some(max) = upd.buy_restriction_max.as_mut() {
                *max = round_at_least_one(*max * restriction.value());
                changed = true;
            }
        }

        // Unlimited stock supersedes any purchase limit.
        if config.unlimited_trader_stock && upd.unlimited_count.is_some() {
            upd.unlimited_count = Some(true);
            upd.buy_restriction_max = None;
            changed = true;
        }

        if !stock.is_noop() {
            if let Some(count) = upd.stack_objects_count.as_mut() {
                *count = round_at_least_one(*count * stock.value());
                changed = true;
            }
        }

        if changed {
            changed_items = changed_items.saturating_add(1);
        }
    }

    changed_items
}

/// Multiply one field of every loyalty level.
fn scale_levels(
    levels: &mut [LoyaltyLevel],
    field: impl Fn(&mut LoyaltyLevel) -> &mut f64,
    multiplier: Multiplier,
) {
    for level in levels {
        *field(level) *= multiplier.value();
    }
}

/// Round to the nearest whole number, never below one.
fn round_at_least_one(value: f64) -> f64 {
    value.round().max(1.0)
}
