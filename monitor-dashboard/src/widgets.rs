//! Widget renderers
//!
//! One renderer per display region. Each consumes its slice of the snapshot
//! and produces the region's full replacement content; the dispatcher in
//! [`crate::poller`] writes it to the [`DisplaySink`] and isolates failures
//! so one bad region never blocks its siblings.

use monitor_core::{format, MonitorError, Snapshot};

use crate::aggregator::{self, Tone, PLACEHOLDER};
use crate::pnl;

/// The display boundary: idempotent full replace of a named region
pub trait DisplaySink: Send {
    fn replace_region(&mut self, region: &str, content: &str);
}

/// A renderer for one display region
pub trait Widget: Send {
    /// The region this widget owns
    fn region(&self) -> &'static str;

    /// Render the region's full replacement content for a snapshot
    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError>;
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "+",
        Tone::Negative => "-",
        Tone::Neutral => " ",
    }
}

/// Header bar: market/account scalars, formatted only
pub struct HeaderWidget;

impl Widget for HeaderWidget {
    fn region(&self) -> &'static str {
        "header"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        let h = &snapshot.header;
        Ok(format!(
            "{} {:.2} | PnL {} | Day {} | Win {} | Trades {} | Exposure {} | Window {} | {}",
            h.asset,
            h.price.round_dp(2),
            format::usd(h.total_pnl),
            format::usd(h.daily_pnl),
            format::percent(h.win_rate),
            h.total_trades,
            format::usd(h.open_exposure),
            format::countdown(h.next_window_seconds),
            h.market_session,
        ))
    }
}

/// Performance panel: aggregate trade statistics, display-only
pub struct PerformanceWidget;

impl Widget for PerformanceWidget {
    fn region(&self) -> &'static str {
        "performance"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        let p = &snapshot.performance;
        let lines = [
            format!("Total PnL  {}", format::usd(p.total)),
            format!("Return     {}", format::percent(p.return_pct)),
            format!("Avg Trade  {}", format::usd(p.avg_trade)),
            format!("Sharpe     {:.2}", p.sharpe.round_dp(2)),
            format!("Max DD     {}", format::usd(p.max_dd)),
            format!("Kelly f*   {}", format::percent(p.kelly_f)),
            format!("DD Limit   {}", format::percent(p.dd_limit)),
        ];
        Ok(lines.join("\n"))
    }
}

/// Five-stage signal pipeline view
pub struct PipelineWidget;

impl Widget for PipelineWidget {
    fn region(&self) -> &'static str {
        "pipeline"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        let views = aggregator::aggregate(&snapshot.execution_pipeline);
        let mut lines = Vec::new();
        for view in &views {
            lines.push(format!("[{}]", view.stage.label()));
            for row in &view.rows {
                let label = if row.emphasized {
                    format!("*{}*", row.label)
                } else {
                    row.label.clone()
                };
                lines.push(format!("{} {} {}", tone_marker(row.tone), label, row.value));
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Positions list with the live mark applied, order as received
pub struct PositionsWidget;

impl Widget for PositionsWidget {
    fn region(&self) -> &'static str {
        "positions"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        let rows = pnl::mark_positions(
            &snapshot.positions_log,
            snapshot.active_contract.as_ref(),
        );
        if rows.is_empty() {
            return Ok("no trades yet".to_string());
        }

        let lines: Vec<String> = rows
            .iter()
            .map(|row| {
                let p = &row.position;
                let entry = p
                    .entry_price
                    .map(format::cents)
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let time = p
                    .entry_time
                    .map(format::clock)
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let pnl = row
                    .pnl
                    .map(format::usd)
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                format!(
                    "{} {} {} @ {} [{}] {}",
                    time,
                    p.side_or_default(),
                    p.slug,
                    entry,
                    row.status_label,
                    pnl,
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Card for the currently tradable contract
pub struct ContractWidget;

impl Widget for ContractWidget {
    fn region(&self) -> &'static str {
        "contract"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        let contract = match &snapshot.active_contract {
            Some(c) => c,
            None => return Ok("no active market".to_string()),
        };

        let title = contract.question.as_deref().unwrap_or(&contract.slug);
        let mut lines = vec![title.to_string()];
        match contract.outcome_prices {
            Some(prices) => lines.push(format!(
                "UP {} / DOWN {}",
                format::cents(prices.up_or_neutral()),
                format::cents(prices.down_or_neutral()),
            )),
            None => lines.push(format!("UP {} / DOWN {}", PLACEHOLDER, PLACEHOLDER)),
        }
        lines.push(contract.slug.clone());
        Ok(lines.join("\n"))
    }
}

/// Recent order entries, passthrough rows
pub struct OrdersWidget;

impl Widget for OrdersWidget {
    fn region(&self) -> &'static str {
        "orders"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        if snapshot.order_feed.is_empty() {
            return Ok("no orders".to_string());
        }
        let lines: Vec<String> = snapshot
            .order_feed
            .iter()
            .map(|entry| {
                let side = entry
                    .side
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let price = entry
                    .entry
                    .map(|e| format!("{:.2}¢", e.round_dp(2)))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let size = entry
                    .size
                    .map(format::usd)
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                format!(
                    "{} {} {} {} {}",
                    entry.time, entry.window, side, price, size
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Per-exchange signal and latency table, passthrough rows
pub struct SignalFlowWidget;

impl Widget for SignalFlowWidget {
    fn region(&self) -> &'static str {
        "signals"
    }

    fn render(&self, snapshot: &Snapshot) -> Result<String, MonitorError> {
        if snapshot.signal_flow.is_empty() {
            return Ok("no signals".to_string());
        }
        let lines: Vec<String> = snapshot
            .signal_flow
            .iter()
            .map(|entry| {
                let signal = entry
                    .signal
                    .map(|s| format!("{:.2}", s.round_dp(2)))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                format!("{} {} {}ms", entry.exchange, signal, entry.latency)
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
