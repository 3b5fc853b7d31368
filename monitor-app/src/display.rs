//! Plain-text display backend
//!
//! The library is display-agnostic; this backend writes each region's
//! replacement content to stdout and renders the two charts as one-line
//! summaries. Every write fully replaces the region's prior block on
//! screen, so re-rendering the same snapshot prints the same output.

use monitor_dashboard::{CandlePoint, CandleSurface, DisplaySink, EquitySurface};
use rust_decimal::Decimal;

/// Region writer printing banner-delimited blocks
#[derive(Default)]
pub struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn replace_region(&mut self, region: &str, content: &str) {
        println!("== {} ==", region);
        println!("{}", content);
    }
}

/// One-line text rendering of the cumulative-equity chart
#[derive(Default)]
pub struct TermEquitySurface;

impl EquitySurface for TermEquitySurface {
    fn initialize(&mut self) {
        println!("== equity_chart ==");
    }

    fn replace_series(&mut self, labels: &[String], equity: &[Decimal]) {
        let latest = equity
            .last()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let span = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!("{}..{}", first, last),
            _ => "-".to_string(),
        };
        println!("== equity_chart ==");
        println!("{} points, {} | latest {}", equity.len(), span, latest);
    }
}

/// One-line text rendering of the candlestick chart
#[derive(Default)]
pub struct TermCandleSurface;

impl CandleSurface for TermCandleSurface {
    fn initialize(&mut self) {
        println!("== price_chart ==");
    }

    fn replace_candles(&mut self, candles: &[CandlePoint]) {
        println!("== price_chart ==");
        match candles.last() {
            Some(last) => println!(
                "{} candles | last O {} H {} L {} C {}",
                candles.len(),
                last.open,
                last.high,
                last.low,
                last.close
            ),
            None => println!("0 candles"),
        }
    }

    fn set_last_price(&mut self, price: Decimal) {
        println!("== price ==");
        println!("{}", price);
    }
}
