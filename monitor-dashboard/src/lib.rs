//! Snapshot synchronization and derived-state layer for the Live Trading
//! Monitor
//!
//! This crate owns the poll-dispatch-render cycle: the snapshot source
//! boundary, the live mark-to-market of open positions, the five-stage
//! pipeline aggregation, the widget renderers, and the two chart state
//! managers.

pub mod aggregator;
pub mod charts;
pub mod controls;
pub mod pnl;
pub mod poller;
pub mod source;
pub mod widgets;

pub use aggregator::{Stage, StageRow, StageView, Tone, PLACEHOLDER};
pub use charts::{
    CandleChartManager, CandlePoint, CandleSurface, EquityChartManager, EquitySurface,
};
pub use controls::{enabled_feeds, ControlCommand, ControlNotifier, FeedToggles};
pub use pnl::{mark_positions, PositionRow};
pub use poller::{Dashboard, PollerConfig, SnapshotPoller};
pub use source::{HttpSnapshotSource, Selection, SnapshotSource};
pub use widgets::{DisplaySink, Widget};
