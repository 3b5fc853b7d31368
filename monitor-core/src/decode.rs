//! Lenient decoding helpers for loosely-typed snapshot fields
//!
//! The backend serializes numbers inconsistently (native numbers, numeric
//! strings, occasionally garbage). These helpers normalize once at the data
//! model boundary so downstream logic only ever sees `Option<Decimal>`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::position::Side;

/// Extract a decimal from a JSON value, accepting numbers and numeric strings.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Deserialize a decimal field that may be a number, a numeric string,
/// or malformed. Malformed input becomes `None` rather than an error.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Deserialize a position side that may be absent, oddly cased, or garbage.
pub(crate) fn lenient_side<'de, D>(deserializer: D) -> Result<Option<Side>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// Deserialize an ISO-8601 timestamp, tolerating malformed input as `None`.
pub(crate) fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decimal_from_number_and_string() {
        assert_eq!(decimal_from_value(&json!(0.55)), Some(dec!(0.55)));
        assert_eq!(decimal_from_value(&json!("0.55")), Some(dec!(0.55)));
        assert_eq!(decimal_from_value(&json!(" -0.023 ")), Some(dec!(-0.023)));
    }

    #[test]
    fn test_decimal_from_garbage() {
        assert_eq!(decimal_from_value(&json!("n/a")), None);
        assert_eq!(decimal_from_value(&json!(null)), None);
        assert_eq!(decimal_from_value(&json!({"nested": 1})), None);
    }
}
