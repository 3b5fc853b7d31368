//! Live Trading Monitor terminal front-end
//!
//! Wires the snapshot poller to the bot's HTTP backend and a plain-text
//! display, and reads simple control commands from stdin:
//!
//! ```text
//! tf 5m              change the candle window
//! feed okx           change the data feed
//! toggle kraken off  flip a feed enable flag
//! refresh            fetch immediately
//! ```

mod display;

use std::sync::Arc;
use std::time::Duration;

use monitor_dashboard::{
    CandleChartManager, ControlCommand, ControlNotifier, Dashboard, EquityChartManager,
    HttpSnapshotSource, PollerConfig, SnapshotPoller,
};
use monitor_core::Timeframe;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::display::{StdoutSink, TermCandleSurface, TermEquitySurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,monitor_app=debug")),
        )
        .init();

    info!("Starting Live Trading Monitor");

    let base_url = std::env::var("MONITOR_BACKEND_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let interval_ms = std::env::var("MONITOR_POLL_INTERVAL_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2000);

    info!("Polling {} every {}ms", base_url, interval_ms);

    let source = Arc::new(HttpSnapshotSource::new(&base_url));

    let mut equity_chart = EquityChartManager::new();
    equity_chart.attach(Box::new(TermEquitySurface));
    let mut candle_chart = CandleChartManager::new();
    candle_chart.attach(Box::new(TermCandleSurface));

    let dashboard = Dashboard::new(Box::new(StdoutSink), equity_chart, candle_chart);

    let config = PollerConfig {
        interval: Duration::from_millis(interval_ms),
    };
    let notifier: Arc<dyn ControlNotifier> = source.clone();
    let poller = SnapshotPoller::new(source, dashboard, config, Some(notifier));

    let (command_tx, command_rx) = mpsc::channel(8);
    tokio::spawn(read_controls(command_tx.clone()));

    // Holding a sender keeps the poller alive after stdin closes.
    poller.run(command_rx).await;
    drop(command_tx);

    Ok(())
}

/// Parse control commands from stdin and forward them to the poller
async fn read_controls(commands: mpsc::Sender<ControlCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let command = match parse_control(&line) {
            Some(command) => command,
            None => {
                if !line.trim().is_empty() {
                    warn!("Unrecognized control: {}", line.trim());
                }
                continue;
            }
        };
        if commands.send(command).await.is_err() {
            break;
        }
    }
}

fn parse_control(line: &str) -> Option<ControlCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "tf" => Timeframe::from_str(parts.next()?).map(ControlCommand::SetTimeframe),
        "feed" => parts
            .next()?
            .parse()
            .ok()
            .map(ControlCommand::SetFeed),
        "toggle" => {
            let feed = parts.next()?.parse().ok()?;
            let enabled = match parts.next()? {
                "on" => true,
                "off" => false,
                _ => return None,
            };
            Some(ControlCommand::SetFeedEnabled(feed, enabled))
        }
        "refresh" => Some(ControlCommand::Refresh),
        _ => None,
    }
}
