//! Snapshot source boundary
//!
//! The backend that assembles snapshots is an external collaborator; the
//! monitor only issues one asynchronous request per cycle carrying the
//! current selection. [`HttpSnapshotSource`] is the production transport.

use async_trait::async_trait;
use monitor_core::{FeedSource, MonitorError, Snapshot, Timeframe};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// The (timeframe, feed) pair carried on every snapshot request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub timeframe: Timeframe,
    pub feed: FeedSource,
}

/// One asynchronous snapshot request per poll cycle.
///
/// `Ok(None)` means the backend had nothing to report yet; the poller skips
/// the cycle without treating it as a failure.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self, selection: &Selection)
        -> Result<Option<Snapshot>, MonitorError>;
}

/// Snapshot source backed by the bot's HTTP endpoint
#[derive(Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    base_url: String,
}

impl HttpSnapshotSource {
    /// Create a new source against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(
        &self,
        selection: &Selection,
    ) -> Result<Option<Snapshot>, MonitorError> {
        let url = format!("{}/snapshot", self.base_url);
        debug!(
            "Fetching snapshot for {}/{}",
            selection.timeframe, selection.feed
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("timeframe", selection.timeframe.as_str()),
                ("source", selection.feed.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MonitorError::transport(format!("snapshot request failed: {}", e)))?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(MonitorError::transport(format!(
                "snapshot request returned {}",
                response.status()
            )));
        }

        let snapshot = response
            .json::<Snapshot>()
            .await
            .map_err(|e| MonitorError::parse(format!("snapshot body: {}", e)))?;

        Ok(Some(snapshot))
    }
}

impl std::fmt::Debug for HttpSnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSnapshotSource")
            .field("base_url", &self.base_url)
            .finish()
    }
}
