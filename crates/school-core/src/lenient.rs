//! Forgiving `deserialize_with` helpers for form and API input.
//!
//! Browser forms post whatever the input element holds: `""` for an empty
//! number box, `"10"` instead of `10`, a stale tag from an older backend.
//! These helpers turn such values into `None` so that validation (or the
//! "unknown type" default) decides what happens, instead of the JSON layer
//! rejecting the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::discount::DiscountType;

/// Discount type tag; unknown tags and non-strings become `None`.
pub(crate) fn discount_type<'de, D>(deserializer: D) -> Result<Option<DiscountType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(tag)) => DiscountType::from_tag(&tag),
        _ => None,
    })
}

/// Text field; numbers are kept as their text, anything else is `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numeric field; numeric strings are parsed, blank or junk is `None`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
