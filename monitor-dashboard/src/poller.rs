//! Snapshot poller and dispatch
//!
//! The control loop of the monitor: fetch a snapshot, fan it out to every
//! widget renderer and chart manager in a fixed order, sleep, repeat. The
//! fetch is the only suspension point; dispatch runs synchronously to
//! completion, so two snapshots can never interleave into the same widget.
//! User commands arrive over a channel on the same task and funnel through
//! the same dispatch path as the interval ticks.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use monitor_core::Snapshot;

use crate::charts::{CandleChartManager, EquityChartManager};
use crate::controls::{ControlCommand, ControlNotifier, FeedToggles};
use crate::source::{Selection, SnapshotSource};
use crate::widgets::{
    ContractWidget, DisplaySink, HeaderWidget, OrdersWidget, PerformanceWidget, PipelineWidget,
    PositionsWidget, SignalFlowWidget, Widget,
};

/// Configuration for the snapshot poller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed cadence between scheduled fetches
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Fan-out target for completed fetches.
///
/// Owns the widget renderers, the display sink, and both chart managers.
/// Nothing else writes to the display state.
pub struct Dashboard {
    widgets: Vec<Box<dyn Widget>>,
    sink: Box<dyn DisplaySink>,
    equity_chart: EquityChartManager,
    candle_chart: CandleChartManager,
}

impl Dashboard {
    /// Build the dispatcher with the fixed widget order: header,
    /// performance, pipeline, positions, contract card, orders, signals,
    /// then the two charts.
    pub fn new(
        sink: Box<dyn DisplaySink>,
        equity_chart: EquityChartManager,
        candle_chart: CandleChartManager,
    ) -> Self {
        let widgets: Vec<Box<dyn Widget>> = vec![
            Box::new(HeaderWidget),
            Box::new(PerformanceWidget),
            Box::new(PipelineWidget),
            Box::new(PositionsWidget),
            Box::new(ContractWidget),
            Box::new(OrdersWidget),
            Box::new(SignalFlowWidget),
        ];
        Self {
            widgets,
            sink,
            equity_chart,
            candle_chart,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_widgets(
        widgets: Vec<Box<dyn Widget>>,
        sink: Box<dyn DisplaySink>,
    ) -> Self {
        Self {
            widgets,
            sink,
            equity_chart: EquityChartManager::new(),
            candle_chart: CandleChartManager::new(),
        }
    }

    /// Dispatch one snapshot to every widget and both charts.
    ///
    /// A failing widget is logged with its region name and skipped; its
    /// region keeps the previous cycle's content while the remaining
    /// widgets render normally.
    pub fn apply(&mut self, snapshot: &Snapshot) {
        for widget in &self.widgets {
            match widget.render(snapshot) {
                Ok(content) => self.sink.replace_region(widget.region(), &content),
                Err(e) => warn!("Widget '{}' failed to render: {}", widget.region(), e),
            }
        }

        self.equity_chart.update(&snapshot.charts);
        self.candle_chart.update(&snapshot.charts);
    }
}

/// The polling control loop
pub struct SnapshotPoller {
    source: Arc<dyn SnapshotSource>,
    dashboard: Dashboard,
    selection: Selection,
    toggles: FeedToggles,
    notifier: Option<Arc<dyn ControlNotifier>>,
    config: PollerConfig,
}

impl SnapshotPoller {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        dashboard: Dashboard,
        config: PollerConfig,
        notifier: Option<Arc<dyn ControlNotifier>>,
    ) -> Self {
        Self {
            source,
            dashboard,
            selection: Selection::default(),
            toggles: FeedToggles::default(),
            notifier,
            config,
        }
    }

    /// The current (timeframe, feed) selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Run the loop until the control channel closes.
    ///
    /// A slow fetch delays the next tick but is never canceled; a user
    /// command mid-interval does not reset the ticker.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ControlCommand>) {
        info!(
            "Starting snapshot poller with {:?} interval",
            self.config.interval
        );

        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => {
                        info!("Control channel closed, stopping poller");
                        break;
                    }
                },
            }
        }
    }

    /// One fetch-and-dispatch cycle; both the ticker and user-triggered
    /// refreshes end up here.
    pub async fn poll_once(&mut self) {
        match self.source.fetch_snapshot(&self.selection).await {
            Ok(Some(snapshot)) => self.dashboard.apply(&snapshot),
            Ok(None) => debug!("Empty snapshot, skipping cycle"),
            Err(e) => warn!("Snapshot fetch failed, keeping previous render: {}", e),
        }
    }

    async fn handle_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::SetTimeframe(timeframe) => {
                if self.selection.timeframe != timeframe {
                    info!("Timeframe changed to {}", timeframe);
                    self.selection.timeframe = timeframe;
                    self.poll_once().await;
                }
            }
            ControlCommand::SetFeed(feed) => {
                if self.selection.feed != feed {
                    info!("Feed changed to {}", feed);
                    self.selection.feed = feed;
                    self.poll_once().await;
                }
            }
            ControlCommand::SetFeedEnabled(feed, enabled) => {
                self.toggles.set(feed, enabled);
                if let Some(notifier) = &self.notifier {
                    notifier.toggles_changed(&self.toggles);
                }
            }
            ControlCommand::Refresh => self.poll_once().await,
        }
    }
}
