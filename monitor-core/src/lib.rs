//! Core types for the Live Trading Monitor
//!
//! This crate defines the snapshot data model shared across the monitor,
//! the tolerant decoding of loosely-typed backend fields, and the pure
//! display formatters.

pub mod contract;
mod decode;
pub mod error;
pub mod feed;
pub mod format;
pub mod pipeline;
pub mod position;
pub mod snapshot;
pub mod timeframe;

pub use contract::{ActiveContract, OutcomePrices};
pub use error::{MonitorError, MonitorResult};
pub use feed::FeedSource;
pub use pipeline::{
    EdgeStage, OddsStage, PipelineState, SourceEdge, SourceOdds, BLENDED_SOURCE,
};
pub use position::{Position, PositionStatus, Side};
pub use snapshot::{
    Candle, ChartSeries, Header, OrderFeedEntry, PerformanceSummary, SignalFlowEntry, Snapshot,
};
pub use timeframe::Timeframe;
