//! Control surface
//!
//! User interaction reaches the poller as [`ControlCommand`]s over a
//! channel: selection changes trigger an immediate out-of-band fetch, feed
//! toggles update local state and fire the outbound notification. The
//! notification is fire-and-forget; nothing here consumes a response.

use monitor_core::{FeedSource, FeedSource::*, Timeframe};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::source::HttpSnapshotSource;

/// Named per-feed enable flags, the payload of the outbound notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedToggles {
    pub binance: bool,
    pub coinbase: bool,
    pub okx: bool,
    pub kraken: bool,
}

impl Default for FeedToggles {
    fn default() -> Self {
        Self {
            binance: true,
            coinbase: true,
            okx: true,
            kraken: true,
        }
    }
}

impl FeedToggles {
    pub fn set(&mut self, feed: FeedSource, enabled: bool) {
        match feed {
            Binance => self.binance = enabled,
            Coinbase => self.coinbase = enabled,
            Okx => self.okx = enabled,
            Kraken => self.kraken = enabled,
        }
    }

    pub fn is_enabled(&self, feed: FeedSource) -> bool {
        match feed {
            Binance => self.binance,
            Coinbase => self.coinbase,
            Okx => self.okx,
            Kraken => self.kraken,
        }
    }
}

/// Commands from UI controls into the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Change the candle window; refetches immediately
    SetTimeframe(Timeframe),
    /// Change the data feed; refetches immediately
    SetFeed(FeedSource),
    /// Flip one feed's enable flag; notifies the backend, no refetch
    SetFeedEnabled(FeedSource, bool),
    /// Refetch without changing the selection
    Refresh,
}

/// Outbound boundary: fire-and-forget notification of changed toggles
pub trait ControlNotifier: Send + Sync {
    fn toggles_changed(&self, toggles: &FeedToggles);
}

impl ControlNotifier for HttpSnapshotSource {
    fn toggles_changed(&self, toggles: &FeedToggles) {
        let url = format!("{}/controls", self.base_url());
        let client = self.client().clone();
        let toggles = *toggles;
        tokio::spawn(async move {
            debug!("Pushing control update: {:?}", toggles);
            if let Err(e) = client.post(&url).json(&toggles).send().await {
                warn!("Control update failed (ignored): {}", e);
            }
        });
    }
}

/// Feeds currently enabled. Reporting only; the backend owns filtering.
pub fn enabled_feeds(toggles: &FeedToggles) -> Vec<FeedSource> {
    [Binance, Coinbase, Okx, Kraken]
        .into_iter()
        .filter(|feed| toggles.is_enabled(*feed))
        .collect()
}
