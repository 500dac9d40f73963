//! Trader currencies.
//!
//! The game knows three currencies. Each is both a code used on the trader
//! base (`"RUB"`, `"USD"`, `"EUR"`) and an item template that appears as the
//! cost of a priced offer in a barter scheme. Codes read from data are kept
//! as strings on the records; [`Currency`] is what the transformer works
//! with once a code has been recognized.

use serde::{Deserialize, Serialize};

/// Item template id of the rouble.
pub const ROUBLE_TEMPLATE_ID: &str = "5449016a4bdc2d6f028b456f";

/// Item template id of the dollar.
pub const DOLLAR_TEMPLATE_ID: &str = "5696686a4bdc2da3298b456a";

/// Item template id of the euro.
pub const EURO_TEMPLATE_ID: &str = "569668774bdc2da2298b4568";

/// A currency a trader can price offers in.
///
/// RUB is the hub currency: exchange rates for the other two are expressed
/// in roubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Russian rouble, the hub currency.
    Rub,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 3] = [Self::Rub, Self::Usd, Self::Eur];

    /// The code stored on a trader base (`"RUB"`, `"USD"`, `"EUR"`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Rub => "RUB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// The item template used when this currency is the cost of an offer.
    pub const fn template_id(self) -> &'static str {
        match self {
            Self::Rub => ROUBLE_TEMPLATE_ID,
            Self::Usd => DOLLAR_TEMPLATE_ID,
            Self::Eur => EURO_TEMPLATE_ID,
        }
    }

    /// Recognize a currency code. Matching is exact, as in the database.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Recognize a currency item template.
    pub fn from_template_id(template_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.template_id() == template_id)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether an item template is one of the three currency items.
pub fn is_currency_item(template_id: &str) -> bool {
    Currency::from_template_id(template_id).is_some()
}
