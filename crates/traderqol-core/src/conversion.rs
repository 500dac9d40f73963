//! Currency conversion through the rouble hub.
//!
//! The settings give two rates, roubles per dollar and roubles per euro.
//! Every conversion is expressed relative to RUB:
//!
//! ```text
//! rate(a, b) = rate(a, RUB) * rate(RUB, b)
//! rate(USD, RUB) = dollarExchangeRate      rate(RUB, USD) = 1 / dollarExchangeRate
//! rate(EUR, RUB) = euroExchangeRate        rate(RUB, EUR) = 1 / euroExchangeRate
//! ```
//!
//! so `rate(a, b) * rate(b, a)` is always one. Rates are multiplicative:
//! an amount in `a` times `rate(a, b)` is the same amount in `b`.

use traderqol_types::Currency;

use crate::config::SingleCurrencySettings;

/// A currency code outside the supported set was found in data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The code is not RUB, USD, or EUR.
    #[error("unsupported currency code {code:?}")]
    UnsupportedCurrency {
        /// The offending code.
        code: String,
    },
}

/// Roubles per unit of `currency`.
const fn to_hub(currency: Currency, settings: &SingleCurrencySettings) -> f64 {
    match currency {
        Currency::Rub => 1.0,
        Currency::Usd => settings.dollar_exchange_rate.value(),
        Currency::Eur => settings.euro_exchange_rate.value(),
    }
}

/// Multiplicative rate converting an amount in `from` into `to`.
///
/// Identical currencies always give exactly `1.0`.
pub fn exchange_rate(from: Currency, to: Currency, settings: &SingleCurrencySettings) -> f64 {
    if from == to {
        return 1.0;
    }
    to_hub(from, settings) / to_hub(to, settings)
}

/// Like [`exchange_rate`], for a source code read from data.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedCurrency`] if `from` is not a
/// supported code.
pub fn exchange_rate_from_code(
    from: &str,
    to: Currency,
    settings: &SingleCurrencySettings,
) -> Result<f64, ConversionError> {
    let from = Currency::from_code(from).ok_or_else(|| ConversionError::UnsupportedCurrency {
        code: from.to_owned(),
    })?;
    Ok(exchange_rate(from, to, settings))
}
