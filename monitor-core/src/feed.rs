//! Exchange feed definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchanges the bot can source market data from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Binance spot feed
    Binance,
    /// Coinbase spot feed
    Coinbase,
    /// OKX spot feed
    Okx,
    /// Kraken spot feed
    Kraken,
}

impl FeedSource {
    /// Get a short identifier for the feed (for display)
    pub fn short_name(&self) -> &'static str {
        match self {
            FeedSource::Binance => "BIN",
            FeedSource::Coinbase => "CB",
            FeedSource::Okx => "OKX",
            FeedSource::Kraken => "KRK",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FeedSource::Binance => "Binance",
            FeedSource::Coinbase => "Coinbase",
            FeedSource::Okx => "OKX",
            FeedSource::Kraken => "Kraken",
        }
    }

    /// Identifier used in request query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::Binance => "binance",
            FeedSource::Coinbase => "coinbase",
            FeedSource::Okx => "okx",
            FeedSource::Kraken => "kraken",
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Binance
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for FeedSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" | "bin" => Ok(FeedSource::Binance),
            "coinbase" | "cb" => Ok(FeedSource::Coinbase),
            "okx" => Ok(FeedSource::Okx),
            "kraken" | "krk" => Ok(FeedSource::Kraken),
            _ => Err(format!("Unknown feed source: {}", s)),
        }
    }
}
