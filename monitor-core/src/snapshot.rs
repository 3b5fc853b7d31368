//! Dashboard snapshot structures
//!
//! A snapshot is one complete poll cycle's worth of dashboard state. Each
//! cycle fully replaces the previous snapshot; nothing here is merged
//! incrementally and nothing here is mutated by the monitor.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contract::ActiveContract;
use crate::decode;
use crate::pipeline::PipelineState;
use crate::position::{Position, Side};

/// Scalar market/account stats shown in the dashboard header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    /// Asset label (e.g. "BTC/USD")
    #[serde(default)]
    pub asset: String,

    /// Current reference price from the selected feed
    #[serde(default)]
    pub price: Decimal,

    /// Cumulative PnL across all closed trades
    #[serde(default)]
    pub total_pnl: Decimal,

    /// PnL attributed to the current day
    #[serde(default)]
    pub daily_pnl: Decimal,

    /// Win rate over closed trades, already in percent (0 - 100)
    #[serde(default)]
    pub win_rate: Decimal,

    /// Total number of logged trades
    #[serde(default)]
    pub total_trades: u32,

    /// Capital currently committed to open positions
    #[serde(default)]
    pub open_exposure: Decimal,

    /// Seconds until the current trading window closes
    #[serde(default)]
    pub next_window_seconds: i64,

    /// Human-readable session label (e.g. "09:05AM–09:10AM UTC")
    #[serde(default)]
    pub market_session: String,
}

/// Aggregate trade statistics, computed upstream and display-only here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    #[serde(default)]
    pub total: Decimal,

    /// Return over the charted window, in percent
    #[serde(default)]
    pub return_pct: Decimal,

    /// Average PnL per closed trade
    #[serde(default)]
    pub avg_trade: Decimal,

    /// Sharpe-like ratio
    #[serde(default)]
    pub sharpe: Decimal,

    /// Worst single-trade drawdown
    #[serde(default)]
    pub max_dd: Decimal,

    /// Kelly sizing fraction, in percent
    #[serde(default)]
    pub kelly_f: Decimal,

    /// Drawdown limit the bot halts at, in percent
    #[serde(default)]
    pub dd_limit: Decimal,
}

/// A single OHLCV candle from the selected feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Start time of the candle
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: Decimal,
    /// Highest price during the window
    pub high: Decimal,
    /// Lowest price during the window
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Traded volume during the window
    #[serde(default)]
    pub volume: Decimal,
}

/// Time series backing the two chart widgets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Timestamps for the equity series
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,

    /// Cumulative equity per closed trade
    #[serde(default)]
    pub equity: Vec<Decimal>,

    /// Price candles for the candlestick chart
    #[serde(default)]
    pub candles: Vec<Candle>,
}

/// One row of the recent-orders feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFeedEntry {
    /// Wall-clock entry time label
    #[serde(default)]
    pub time: String,

    /// Market window (e.g. "5m")
    #[serde(default)]
    pub window: String,

    #[serde(default, deserialize_with = "decode::lenient_side")]
    pub side: Option<Side>,

    /// Entry price in cents
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub entry: Option<Decimal>,

    /// Order notional
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub size: Option<Decimal>,
}

/// One row of the per-exchange signal table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalFlowEntry {
    /// Exchange short code (e.g. "BIN", "OKX")
    #[serde(default)]
    pub exchange: String,

    /// Normalized signal value (-1.0 - 1.0)
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub signal: Option<Decimal>,

    /// Feed latency in milliseconds
    #[serde(default)]
    pub latency: u32,
}

/// One complete poll cycle's worth of dashboard state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub header: Header,

    #[serde(default)]
    pub performance: PerformanceSummary,

    #[serde(default)]
    pub execution_pipeline: PipelineState,

    /// Trade log in the order the backend produced it, never reordered
    #[serde(default)]
    pub positions_log: Vec<Position>,

    /// The currently tradable market, if any
    #[serde(default)]
    pub active_contract: Option<ActiveContract>,

    #[serde(default)]
    pub charts: ChartSeries,

    /// Recent order entries
    #[serde(default)]
    pub order_feed: Vec<OrderFeedEntry>,

    /// Per-exchange signal/latency rows
    #[serde(default)]
    pub signal_flow: Vec<SignalFlowEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_deserializes_minimal_body() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();

        assert!(snapshot.positions_log.is_empty());
        assert!(snapshot.active_contract.is_none());
        assert!(snapshot.charts.candles.is_empty());
    }

    #[test]
    fn test_snapshot_deserializes_full_body() {
        let raw = r#"{
            "header": {
                "asset": "BTC/USD",
                "price": 64250.5,
                "total_pnl": 12.4,
                "daily_pnl": 1.56,
                "win_rate": 54.2,
                "total_trades": 120,
                "open_exposure": 520.0,
                "next_window_seconds": 125,
                "market_session": "09:05AM–09:10AM UTC"
            },
            "performance": {"total": 12.4, "return_pct": 1.8, "avg_trade": 0.11,
                            "sharpe": 1.4, "max_dd": -2.3, "kelly_f": 2.5, "dd_limit": -5.0},
            "positions_log": [
                {"slug": "btc-updown-5m-1733000000", "side": "UP",
                 "entry_price": 0.5, "status": "OPEN"}
            ],
            "active_contract": {
                "slug": "btc-updown-5m-1733000000",
                "question": "Bitcoin Up or Down?",
                "outcomePrices": ["0.55", "0.45"]
            },
            "charts": {
                "timestamps": ["2024-12-01T09:05:00Z"],
                "equity": [0.5],
                "candles": [
                    {"timestamp": "2024-12-01T09:05:00Z", "open": 64000.0,
                     "high": 64300.0, "low": 63900.0, "close": 64250.5, "volume": 12.5}
                ]
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();

        assert_eq!(snapshot.header.next_window_seconds, 125);
        assert_eq!(snapshot.positions_log.len(), 1);
        assert_eq!(snapshot.charts.candles[0].close, dec!(64250.5));
        assert!(snapshot.active_contract.is_some());
    }
}
