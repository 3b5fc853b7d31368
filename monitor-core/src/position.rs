//! Position structures from the bot's trade log
//!
//! Positions are read-only to the monitor: the bot opens and closes them
//! upstream, the monitor only formats and (for the one open position on the
//! active contract) recomputes the unrealized value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decode;

/// Direction of a position in a two-outcome market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Outcome-price index for this side (0 = UP, 1 = DOWN)
    pub fn price_index(&self) -> usize {
        match self {
            Side::Up => 0,
            Side::Down => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Up => "UP",
            Side::Down => "DOWN",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(Side::Up),
            "DOWN" => Ok(Side::Down),
            _ => Err(format!("Unknown side: {}", s)),
        }
    }
}

/// Lifecycle status of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    /// Still running, settles when the market window closes
    Open,
    /// Settled upstream, `pnl` is realized
    Closed,
}

impl Default for PositionStatus {
    fn default() -> Self {
        PositionStatus::Open
    }
}

impl PositionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionStatus::Open => "OPEN",
            PositionStatus::Closed => "CLOSED",
        }
    }
}

/// One row of the bot's forward-trade log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Trade identifier (the market's condition id upstream)
    #[serde(default)]
    pub id: Option<String>,

    /// Market identifier the position was taken on
    pub slug: String,

    /// Which outcome the bot bought; absent or malformed defaults to UP
    #[serde(default, deserialize_with = "decode::lenient_side")]
    pub side: Option<Side>,

    /// Entry price in probability space (0.00 - 1.00)
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub entry_price: Option<Decimal>,

    /// When the position was opened
    #[serde(default, deserialize_with = "decode::lenient_datetime")]
    pub entry_time: Option<DateTime<Utc>>,

    /// Lifecycle status, transitions OPEN -> CLOSED exactly once upstream
    #[serde(default)]
    pub status: PositionStatus,

    /// Model conviction at entry (probability of the chosen side)
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub probability: Option<Decimal>,

    /// Realized PnL for closed positions, last marked value otherwise
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub pnl: Option<Decimal>,

    /// Optional take-profit price in probability space
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub profit_target: Option<Decimal>,

    /// How a closed position resolved (winning side, "TP", "SL", "EXPIRE")
    #[serde(default)]
    pub result_side: Option<String>,
}

impl Position {
    /// Check whether this position is still running
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Side with the UP default applied
    pub fn side_or_default(&self) -> Side {
        self.side.unwrap_or(Side::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_deserializes_sparse_row() {
        let raw = r#"{"slug": "btc-updown-5m-1733000000"}"#;
        let position: Position = serde_json::from_str(raw).unwrap();

        assert!(position.is_open());
        assert_eq!(position.side_or_default(), Side::Up);
        assert_eq!(position.pnl, None);
    }

    #[test]
    fn test_position_tolerates_string_numbers() {
        let raw = r#"{
            "slug": "btc-updown-5m-1733000000",
            "side": "down",
            "entry_price": "0.47",
            "status": "CLOSED",
            "pnl": 0.12,
            "result_side": "DOWN"
        }"#;
        let position: Position = serde_json::from_str(raw).unwrap();

        assert_eq!(position.side, Some(Side::Down));
        assert_eq!(position.entry_price, Some(dec!(0.47)));
        assert_eq!(position.status, PositionStatus::Closed);
        assert_eq!(position.pnl, Some(dec!(0.12)));
    }
}
