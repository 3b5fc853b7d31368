//! Live mark-to-market of open positions
//!
//! The snapshot carries each position's last-known PnL. For the one open
//! position sitting on the currently active contract we can do better: the
//! contract's live outcome prices arrive with every snapshot, so the
//! unrealized value is recomputed here each cycle. Every other position
//! displays its upstream value verbatim.

use monitor_core::{format, ActiveContract, Position};
use rust_decimal::Decimal;

/// A position prepared for display, with the live override applied
#[derive(Debug, Clone)]
pub struct PositionRow {
    pub position: Position,

    /// Displayed PnL: live mark for the active open position, upstream
    /// value for everything else
    pub pnl: Option<Decimal>,

    /// Status column text: the bare status word, or the live price in
    /// display cents when the mark was recomputed
    pub status_label: String,

    /// Whether the PnL was recomputed this cycle
    pub live: bool,
}

/// Mark positions against the active contract, preserving input order.
pub fn mark_positions(
    positions: &[Position],
    active_contract: Option<&ActiveContract>,
) -> Vec<PositionRow> {
    positions
        .iter()
        .map(|position| mark_position(position, active_contract))
        .collect()
}

fn mark_position(position: &Position, active_contract: Option<&ActiveContract>) -> PositionRow {
    let upstream = PositionRow {
        position: position.clone(),
        pnl: position.pnl,
        status_label: position.status.as_str().to_string(),
        live: false,
    };

    if !position.is_open() {
        return upstream;
    }
    let contract = match active_contract {
        Some(c) if c.slug == position.slug => c,
        _ => return upstream,
    };
    // Any hole in the live data leaves the upstream value untouched.
    let (prices, entry_price) = match (contract.outcome_prices, position.entry_price) {
        (Some(p), Some(e)) => (p, e),
        _ => return upstream,
    };
    let current_price = match prices.side_price(position.side_or_default()) {
        Some(p) => p,
        None => return upstream,
    };

    PositionRow {
        position: position.clone(),
        pnl: Some(current_price - entry_price),
        status_label: format::cents(current_price),
        live: true,
    }
}
