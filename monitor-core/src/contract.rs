//! Active market contract and outcome-price normalization
//!
//! The backend relays the active contract straight from the venue API, which
//! encodes `outcomePrices` either as a native array or as a JSON string
//! (e.g. `"[\"0.55\", \"0.45\"]"`). Normalization happens once here so the
//! rest of the monitor never sees the ambiguity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::decode::{decimal_from_value, lenient_datetime};
use crate::position::Side;

/// Neutral prior used when one slot of an outcome-price pair is unusable
fn neutral_price() -> Decimal {
    Decimal::new(5, 1)
}

/// Two-outcome prices for the active contract, index 0 = UP, index 1 = DOWN.
///
/// Slots are `None` when the incoming value was present but not a usable
/// number; display paths substitute the neutral 0.5 prior, while the PnL
/// calculator treats `None` as "leave the upstream value alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomePrices {
    up: Option<Decimal>,
    down: Option<Decimal>,
}

impl OutcomePrices {
    pub fn new(up: Option<Decimal>, down: Option<Decimal>) -> Self {
        Self { up, down }
    }

    /// Decode from whatever the venue sent: a native array, or a JSON string
    /// wrapping one. Returns `None` when the value is not array-shaped at all.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => serde_json::from_str::<Value>(s)
                .ok()
                .as_ref()
                .and_then(Self::from_value),
            Value::Array(slots) => Some(Self {
                up: slots.first().and_then(decimal_from_value),
                down: slots.get(1).and_then(decimal_from_value),
            }),
            _ => None,
        }
    }

    /// Exact price for a side, `None` if that slot did not carry a number.
    pub fn side_price(&self, side: Side) -> Option<Decimal> {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
        }
    }

    /// UP price with the neutral prior substituted for an unusable slot
    pub fn up_or_neutral(&self) -> Decimal {
        self.up.unwrap_or_else(neutral_price)
    }

    /// DOWN price with the neutral prior substituted for an unusable slot
    pub fn down_or_neutral(&self) -> Decimal {
        self.down.unwrap_or_else(neutral_price)
    }
}

fn de_outcome_prices<'de, D>(deserializer: D) -> Result<Option<OutcomePrices>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(OutcomePrices::from_value))
}

/// The market contract currently being traded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveContract {
    /// Market identifier, matched against `Position::slug`
    pub slug: String,

    /// Human-readable market question
    #[serde(default)]
    pub question: Option<String>,

    /// Market image URL
    #[serde(default)]
    pub image: Option<String>,

    /// When the market window closes
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub end_date: Option<DateTime<Utc>>,

    /// Live outcome prices, in either venue encoding
    #[serde(
        default,
        rename = "outcomePrices",
        deserialize_with = "de_outcome_prices"
    )]
    pub outcome_prices: Option<OutcomePrices>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_native_array_and_json_string_agree() {
        let native = OutcomePrices::from_value(&json!(["0.55", "0.45"])).unwrap();
        let encoded = OutcomePrices::from_value(&json!("[\"0.55\", \"0.45\"]")).unwrap();

        assert_eq!(native, encoded);
        assert_eq!(native.side_price(Side::Up), Some(dec!(0.55)));
        assert_eq!(native.side_price(Side::Down), Some(dec!(0.45)));
    }

    #[test]
    fn test_numeric_array() {
        let prices = OutcomePrices::from_value(&json!([0.61, 0.39])).unwrap();
        assert_eq!(prices.side_price(Side::Up), Some(dec!(0.61)));
    }

    #[test]
    fn test_malformed_input_is_none_not_error() {
        assert_eq!(OutcomePrices::from_value(&json!(42)), None);
        assert_eq!(OutcomePrices::from_value(&json!("not json")), None);
        assert_eq!(OutcomePrices::from_value(&json!({"up": 0.5})), None);
    }

    #[test]
    fn test_missing_slot_gets_neutral_prior_for_display() {
        let prices = OutcomePrices::from_value(&json!(["0.62"])).unwrap();

        assert_eq!(prices.side_price(Side::Up), Some(dec!(0.62)));
        assert_eq!(prices.side_price(Side::Down), None);
        assert_eq!(prices.down_or_neutral(), dec!(0.5));
    }

    #[test]
    fn test_contract_deserializes_both_encodings() {
        let native: ActiveContract = serde_json::from_str(
            r#"{"slug": "btc-updown-5m-1733000000", "outcomePrices": [0.55, 0.45]}"#,
        )
        .unwrap();
        let encoded: ActiveContract = serde_json::from_str(
            r#"{"slug": "btc-updown-5m-1733000000", "outcomePrices": "[\"0.55\", \"0.45\"]"}"#,
        )
        .unwrap();

        assert_eq!(native.outcome_prices, encoded.outcome_prices);
    }

    #[test]
    fn test_contract_with_garbage_prices_still_parses() {
        let contract: ActiveContract = serde_json::from_str(
            r#"{"slug": "btc-updown-5m-1733000000", "outcomePrices": "oops"}"#,
        )
        .unwrap();

        assert_eq!(contract.outcome_prices, None);
    }
}
