//! Trader records.
//!
//! A trader is split across two database documents: the base (identity,
//! currency, loyalty levels, services) and the assort (stocked items and the
//! barter scheme that prices them). [`Trader`] joins the two.
//!
//! Only the fields the transformer reads or writes are modelled. Everything
//! else lands in the `extra` map of the nearest record and is written back
//! untouched. Modelled fields a document may omit are `Option`s, so an
//! absent field stays absent on the way out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::currency::{Currency, is_currency_item};

/// A trader with its base document and assort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    /// Identity, currency, loyalty levels, and services.
    pub base: TraderBase,

    /// Stocked items and their prices. `None` for traders with no assort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assort: Option<Assort>,

    /// Unmodelled trader fields (dialogue, suits, quest assort, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The trader base document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderBase {
    /// Display nickname, used to exclude special traders.
    pub nickname: String,

    /// Currency code the trader deals in. Kept as text because the
    /// database is not guaranteed to hold a supported code.
    pub currency: String,

    /// Reputation tiers, lowest first.
    #[serde(
        rename = "loyaltyLevels",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub loyalty_levels: Option<Vec<LoyaltyLevel>>,

    /// Insurance service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<ServiceAvailability>,

    /// Repair service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair: Option<ServiceAvailability>,

    /// Unmodelled base fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TraderBase {
    /// The trader's currency, if its code is one of the supported three.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_code(&self.currency)
    }

    /// Reputation tiers, empty when the document has none.
    pub fn loyalty_levels(&self) -> &[LoyaltyLevel] {
        self.loyalty_levels.as_deref().unwrap_or_default()
    }

    /// Mutable reputation tiers, empty when the document has none.
    pub fn loyalty_levels_mut(&mut self) -> &mut [LoyaltyLevel] {
        self.loyalty_levels.as_deref_mut().unwrap_or_default()
    }

    /// Whether the trader offers insurance.
    pub fn offers_insurance(&self) -> bool {
        self.insurance
            .as_ref()
            .is_some_and(ServiceAvailability::is_available)
    }

    /// Whether the trader offers repairs.
    pub fn offers_repair(&self) -> bool {
        self.repair
            .as_ref()
            .is_some_and(ServiceAvailability::is_available)
    }
}

/// One reputation tier on a trader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyLevel {
    /// Total sales, in the trader's currency, needed to reach this tier.
    #[serde(rename = "minSalesSum", with = "crate::number")]
    pub min_sales_sum: f64,

    /// Insurance price coefficient at this tier.
    #[serde(with = "crate::number")]
    pub insurance_price_coef: f64,

    /// Repair price coefficient at this tier.
    #[serde(with = "crate::number")]
    pub repair_price_coef: f64,

    /// Unmodelled tier fields (`minLevel`, `buy_price_coef`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Availability flag of a trader service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAvailability {
    /// Whether the service is offered at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,

    /// Unmodelled service fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceAvailability {
    /// Whether the service is offered. An absent flag means it is not.
    pub fn is_available(&self) -> bool {
        self.availability == Some(true)
    }
}

/// A list of items that together pay for one offer.
///
/// A single currency item is a plain price; more than one item is a true
/// barter trade.
pub type BarterEntry = Vec<BarterItem>;

/// The trader's stock and price list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assort {
    /// Stocked items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<AssortItem>>,

    /// Offer id to the alternative ways of paying for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barter_scheme: Option<BTreeMap<String, Vec<BarterEntry>>>,

    /// Unmodelled assort fields (`loyal_level_items`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Assort {
    /// Stocked items, empty when the document has none.
    pub fn items(&self) -> &[AssortItem] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Mutable stocked items, empty when the document has none.
    pub fn items_mut(&mut self) -> &mut [AssortItem] {
        self.items.as_deref_mut().unwrap_or_default()
    }

    /// Every offer priced in a single currency item.
    ///
    /// Entries with more than one item are barters and are never yielded.
    pub fn priced_offers_mut(&mut self) -> impl Iterator<Item = &mut BarterItem> {
        self.barter_scheme
            .iter_mut()
            .flat_map(BTreeMap::values_mut)
            .flat_map(|entries| entries.iter_mut())
            .filter_map(|entry| match entry.as_mut_slice() {
                [item] if is_currency_item(&item.template_id) => Some(item),
                _ => None,
            })
    }
}

/// A stocked item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssortItem {
    /// Item instance id; offers in the barter scheme are keyed by it.
    #[serde(rename = "_id")]
    pub id: String,

    /// Stock metadata. Child items (attachments) usually carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<ItemUpd>,

    /// Unmodelled item fields (`_tpl`, `parentId`, `slotId`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stock metadata on an assort item. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpd {
    /// Per-player purchase limit.
    #[serde(
        rename = "BuyRestrictionMax",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::number::option"
    )]
    pub buy_restriction_max: Option<f64>,

    /// Whether stock never runs out.
    #[serde(
        rename = "UnlimitedCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unlimited_count: Option<bool>,

    /// Units in stock.
    #[serde(
        rename = "StackObjectsCount",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::number::option"
    )]
    pub stack_objects_count: Option<f64>,

    /// Unmodelled metadata (`BuyRestrictionCurrent`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One item in a barter entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarterItem {
    /// Template of the required item.
    #[serde(rename = "_tpl")]
    pub template_id: String,

    /// How many are required. For a currency item this is the price.
    #[serde(with = "crate::number")]
    pub count: f64,

    /// Unmodelled fields (`level`, `side`, `onlyFunctional`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarterItem {
    /// The currency this item represents, if it is a currency item.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_template_id(&self.template_id)
    }
}
