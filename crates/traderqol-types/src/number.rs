//! Serde helpers for numeric record fields.
//!
//! The database stores prices, stock counts, and sales thresholds as JSON
//! numbers that are usually whole. The records hold them as `f64` because
//! scaling may make them fractional, but a whole value is written back as an
//! integer so `100` does not come out as `100.0`.
//!
//! Use with `#[serde(with = "crate::number")]`, or [`option`] for optional
//! fields.

use serde::{Deserialize, Deserializer, Serializer};

/// Largest magnitude written as an integer. Beyond this an `f64` no longer
/// holds every whole number exactly.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// Return the value as an integer when it is whole and exactly representable.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn as_whole(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_WHOLE {
        Some(value as i64)
    } else {
        None
    }
}

/// Serialize an `f64`, as an integer when it is whole.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match as_whole(*value) {
        Some(whole) => serializer.serialize_i64(whole),
        None => serializer.serialize_f64(*value),
    }
}

/// Deserialize any JSON number into an `f64`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer)
}

/// The same helpers for `Option<f64>` fields.
///
/// Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`
/// so an absent field stays absent.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional `f64`, as an integer when it is whole.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional JSON number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)
    }
}
