//! Chart state managers
//!
//! Two independently-owned incremental widgets: the cumulative-equity line
//! chart and the candlestick price chart. Each manager owns an optional
//! backend surface and replaces that surface's dataset wholesale every
//! cycle; there is no diffing and no animation, so the end state after any
//! update is fully determined by the last snapshot. Until a surface is
//! attached, updates are no-ops, which guards the race between display
//! initialization and the first poll cycle.

use chrono::{DateTime, Utc};
use monitor_core::{format, ChartSeries};
use rust_decimal::Decimal;

/// Backend surface for the cumulative-equity line chart
pub trait EquitySurface: Send {
    /// Construct the empty chart; called once before the first replace
    fn initialize(&mut self);

    /// Replace the label array and the single data series wholesale
    fn replace_series(&mut self, labels: &[String], equity: &[Decimal]);
}

/// A candle in the candlestick surface's point encoding
#[derive(Debug, Clone, PartialEq)]
pub struct CandlePoint {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Backend surface for the candlestick price chart
pub trait CandleSurface: Send {
    /// Construct the empty chart; called once before the first replace
    fn initialize(&mut self);

    /// Replace the candle series wholesale
    fn replace_candles(&mut self, candles: &[CandlePoint]);

    /// Update the standalone current-price readout
    fn set_last_price(&mut self, price: Decimal);
}

/// Owns the cumulative-equity chart's mutable state
pub struct EquityChartManager {
    surface: Option<Box<dyn EquitySurface>>,
    initialized: bool,
}

impl EquityChartManager {
    pub fn new() -> Self {
        Self {
            surface: None,
            initialized: false,
        }
    }

    /// Attach the backend surface once it exists
    pub fn attach(&mut self, surface: Box<dyn EquitySurface>) {
        self.surface = Some(surface);
    }

    /// Apply one cycle's chart series; no-op until a surface is attached
    pub fn update(&mut self, series: &ChartSeries) {
        let surface = match self.surface.as_mut() {
            Some(s) => s,
            None => return,
        };
        if !self.initialized {
            surface.initialize();
            self.initialized = true;
        }

        let labels: Vec<String> = series.timestamps.iter().map(|ts| format::clock(*ts)).collect();
        surface.replace_series(&labels, &series.equity);
    }
}

impl Default for EquityChartManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the candlestick chart's mutable state
pub struct CandleChartManager {
    surface: Option<Box<dyn CandleSurface>>,
    initialized: bool,
}

impl CandleChartManager {
    pub fn new() -> Self {
        Self {
            surface: None,
            initialized: false,
        }
    }

    /// Attach the backend surface once it exists
    pub fn attach(&mut self, surface: Box<dyn CandleSurface>) {
        self.surface = Some(surface);
    }

    /// Apply one cycle's candle series; no-op until a surface is attached
    pub fn update(&mut self, series: &ChartSeries) {
        let surface = match self.surface.as_mut() {
            Some(s) => s,
            None => return,
        };
        if !self.initialized {
            surface.initialize();
            self.initialized = true;
        }

        let points: Vec<CandlePoint> = series
            .candles
            .iter()
            .map(|c| CandlePoint {
                timestamp: c.timestamp,
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
            })
            .collect();
        surface.replace_candles(&points);

        if let Some(last) = series.candles.last() {
            surface.set_last_price(last.close);
        }
    }
}

impl Default for CandleChartManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::Candle;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct EquityRecorder {
        initialized: u32,
        labels: Vec<String>,
        equity: Vec<Decimal>,
        replaces: u32,
    }

    struct SharedEquitySurface(Arc<Mutex<EquityRecorder>>);

    impl EquitySurface for SharedEquitySurface {
        fn initialize(&mut self) {
            self.0.lock().unwrap().initialized += 1;
        }

        fn replace_series(&mut self, labels: &[String], equity: &[Decimal]) {
            let mut rec = self.0.lock().unwrap();
            rec.labels = labels.to_vec();
            rec.equity = equity.to_vec();
            rec.replaces += 1;
        }
    }

    #[derive(Default)]
    struct CandleRecorder {
        initialized: u32,
        candles: Vec<CandlePoint>,
        last_price: Option<Decimal>,
    }

    struct SharedCandleSurface(Arc<Mutex<CandleRecorder>>);

    impl CandleSurface for SharedCandleSurface {
        fn initialize(&mut self) {
            self.0.lock().unwrap().initialized += 1;
        }

        fn replace_candles(&mut self, candles: &[CandlePoint]) {
            self.0.lock().unwrap().candles = candles.to_vec();
        }

        fn set_last_price(&mut self, price: Decimal) {
            self.0.lock().unwrap().last_price = Some(price);
        }
    }

    fn series(raw: &str) -> ChartSeries {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_unattached_manager_is_noop() {
        let mut manager = EquityChartManager::new();
        // Must not panic or retain anything.
        manager.update(&ChartSeries::default());
    }

    #[test]
    fn test_equity_initializes_once_and_replaces_wholesale() {
        let recorder = Arc::new(Mutex::new(EquityRecorder::default()));
        let mut manager = EquityChartManager::new();
        manager.attach(Box::new(SharedEquitySurface(recorder.clone())));

        manager.update(&series(
            r#"{"timestamps": ["2024-12-01T09:05:00Z", "2024-12-01T09:10:00Z"],
                "equity": [0.5, 0.8]}"#,
        ));
        manager.update(&series(
            r#"{"timestamps": ["2024-12-01T09:15:00Z"], "equity": [1.1]}"#,
        ));

        let rec = recorder.lock().unwrap();
        assert_eq!(rec.initialized, 1);
        assert_eq!(rec.replaces, 2);
        // Second update fully replaced the first, no accumulation.
        assert_eq!(rec.labels, vec!["09:15:00"]);
        assert_eq!(rec.equity, vec![dec!(1.1)]);
    }

    #[test]
    fn test_candle_manager_maps_points_and_updates_readout() {
        let recorder = Arc::new(Mutex::new(CandleRecorder::default()));
        let mut manager = CandleChartManager::new();
        manager.attach(Box::new(SharedCandleSurface(recorder.clone())));

        let mut chart_series = ChartSeries::default();
        chart_series.candles = vec![Candle {
            timestamp: "2024-12-01T09:05:00Z".parse().unwrap(),
            open: dec!(64000),
            high: dec!(64300),
            low: dec!(63900),
            close: dec!(64250.5),
            volume: dec!(12.5),
        }];

        manager.update(&chart_series);

        let rec = recorder.lock().unwrap();
        assert_eq!(rec.candles.len(), 1);
        assert_eq!(rec.candles[0].close, dec!(64250.5));
        assert_eq!(rec.last_price, Some(dec!(64250.5)));
    }

    #[test]
    fn test_empty_candles_leave_readout_alone() {
        let recorder = Arc::new(Mutex::new(CandleRecorder::default()));
        let mut manager = CandleChartManager::new();
        manager.attach(Box::new(SharedCandleSurface(recorder.clone())));

        manager.update(&ChartSeries::default());

        let rec = recorder.lock().unwrap();
        assert!(rec.candles.is_empty());
        assert_eq!(rec.last_price, None);
    }
}
