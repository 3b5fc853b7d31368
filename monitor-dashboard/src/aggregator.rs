//! Pipeline aggregator
//!
//! Turns the raw five-stage pipeline state into ranked, labeled,
//! color-coded rows, regardless of whether the upstream data arrived in the
//! structured per-source shape or the legacy scalar shape. A single
//! malformed entry never suppresses its siblings: the row renders with a
//! defined fallback and skips classification.

use monitor_core::{format, EdgeStage, OddsStage, PipelineState, SourceEdge, SourceOdds};
use rust_decimal::Decimal;

/// Placeholder glyph for a missing display string
pub const PLACEHOLDER: &str = "—";

/// The five sequential pipeline stages, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Feeds,
    Odds,
    Edge,
    Sizing,
    Execution,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Feeds => "CEX FEEDS",
            Stage::Odds => "MARKET ODDS",
            Stage::Edge => "EDGE",
            Stage::Sizing => "SIZING",
            Stage::Execution => "EXECUTION",
        }
    }
}

/// Color classification of a pipeline row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Bullish odds / favorable edge
    Positive,
    /// Bearish odds / unfavorable edge
    Negative,
    Neutral,
}

/// One labeled, classified display row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRow {
    pub label: String,
    pub value: String,
    pub tone: Tone,
    /// Blended-estimate rows get distinct styling instead of truncation
    pub emphasized: bool,
}

impl StageRow {
    fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone: Tone::Neutral,
            emphasized: false,
        }
    }

    fn placeholder() -> Self {
        Self::plain(PLACEHOLDER, PLACEHOLDER)
    }
}

/// The rows of one pipeline stage
#[derive(Debug, Clone)]
pub struct StageView {
    pub stage: Stage,
    pub rows: Vec<StageRow>,
}

/// Produce the five ordered stage views for a pipeline state.
pub fn aggregate(pipeline: &PipelineState) -> [StageView; 5] {
    [
        StageView {
            stage: Stage::Feeds,
            rows: feed_rows(&pipeline.cex_feeds),
        },
        StageView {
            stage: Stage::Odds,
            rows: odds_rows(&pipeline.pm_odds),
        },
        StageView {
            stage: Stage::Edge,
            rows: edge_rows(&pipeline.edge),
        },
        StageView {
            stage: Stage::Sizing,
            rows: vec![passthrough_row(&pipeline.kelly)],
        },
        StageView {
            stage: Stage::Execution,
            rows: vec![passthrough_row(&pipeline.exec)],
        },
    ]
}

/// Stage 1: one row per comma-separated feed token; empty input, zero rows
fn feed_rows(cex_feeds: &str) -> Vec<StageRow> {
    cex_feeds
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| StageRow::plain(token, ""))
        .collect()
}

/// Stage 2: classified odds rows, ranked by probability descending
fn odds_rows(stage: &OddsStage) -> Vec<StageRow> {
    let entries = match stage {
        OddsStage::Scalar(s) if s.trim().is_empty() => return vec![StageRow::placeholder()],
        OddsStage::Scalar(s) => return vec![StageRow::plain(PLACEHOLDER, s.clone())],
        OddsStage::Sources(entries) if entries.is_empty() => {
            return vec![StageRow::placeholder()]
        }
        OddsStage::Sources(entries) => entries,
    };

    let mut ranked: Vec<&SourceOdds> = entries.iter().collect();
    ranked.sort_by(|a, b| rank_desc(a.prob_up, b.prob_up));

    ranked
        .into_iter()
        .map(|entry| {
            let prob = entry.prob_up.unwrap_or(Decimal::ZERO);
            let tone = match entry.prob_up {
                Some(p) => classify_odds(p),
                None => Tone::Neutral,
            };
            StageRow {
                label: short_label(&entry.source),
                value: format::prob_pct(prob),
                tone,
                emphasized: false,
            }
        })
        .collect()
}

/// Stage 3: directional edge rows, ranked by magnitude descending
fn edge_rows(stage: &EdgeStage) -> Vec<StageRow> {
    let entries = match stage {
        EdgeStage::Scalar(s) if s.trim().is_empty() => return vec![StageRow::placeholder()],
        EdgeStage::Scalar(s) => return vec![StageRow::plain(PLACEHOLDER, s.clone())],
        EdgeStage::Sources(entries) if entries.is_empty() => {
            return vec![StageRow::placeholder()]
        }
        EdgeStage::Sources(entries) => entries,
    };

    let mut ranked: Vec<&SourceEdge> = entries.iter().collect();
    ranked.sort_by(|a, b| rank_desc(a.value.map(|v| v.abs()), b.value.map(|v| v.abs())));

    ranked
        .into_iter()
        .map(|entry| {
            let value = entry.value.unwrap_or(Decimal::ZERO);
            let tone = match entry.value {
                Some(v) if v.is_sign_negative() => Tone::Negative,
                Some(_) => Tone::Positive,
                None => Tone::Neutral,
            };
            let label = if entry.is_blended() {
                entry.source.to_uppercase()
            } else {
                short_label(&entry.source)
            };
            StageRow {
                label,
                value: format!("{} {}", entry.direction(), format::prob_pct(value.abs())),
                tone,
                emphasized: entry.is_blended(),
            }
        })
        .collect()
}

/// Stages 4 and 5: opaque pass-through strings
fn passthrough_row(value: &str) -> StageRow {
    if value.trim().is_empty() {
        StageRow::placeholder()
    } else {
        StageRow::plain("", value)
    }
}

/// Bullish above 0.6, bearish below 0.4, neutral on the band between
fn classify_odds(prob_up: Decimal) -> Tone {
    if prob_up > Decimal::new(6, 1) {
        Tone::Positive
    } else if prob_up < Decimal::new(4, 1) {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Source labels truncate to three characters; missing, the placeholder
fn short_label(source: &str) -> String {
    if source.trim().is_empty() {
        return PLACEHOLDER.to_string();
    }
    source.chars().take(3).collect::<String>().to_uppercase()
}

/// Descending order with missing values last; stable sort keeps arrival
/// order on ties
fn rank_desc(a: Option<Decimal>, b: Option<Decimal>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::Side;
    use rust_decimal_macros::dec;

    fn odds(source: &str, prob_up: Option<Decimal>) -> SourceOdds {
        SourceOdds {
            source: source.to_string(),
            prob_up,
            time: None,
        }
    }

    fn edge(source: &str, value: Option<Decimal>, side: Option<Side>) -> SourceEdge {
        SourceEdge {
            source: source.to_string(),
            value,
            side,
        }
    }

    #[test]
    fn test_five_stages_always() {
        let views = aggregate(&PipelineState::default());
        assert_eq!(views.len(), 5);
        assert_eq!(views[0].stage, Stage::Feeds);
        assert_eq!(views[4].stage, Stage::Execution);
    }

    #[test]
    fn test_feed_tokens_split_and_trimmed() {
        let mut pipeline = PipelineState::default();
        pipeline.cex_feeds = "Binance, Coinbase ,OKX".to_string();

        let views = aggregate(&pipeline);
        let labels: Vec<&str> = views[0].rows.iter().map(|r| r.label.as_str()).collect();

        assert_eq!(labels, vec!["Binance", "Coinbase", "OKX"]);
    }

    #[test]
    fn test_empty_feeds_yield_zero_rows() {
        let views = aggregate(&PipelineState::default());
        assert!(views[0].rows.is_empty());
    }

    #[test]
    fn test_odds_classification_boundaries() {
        let rows = odds_rows(&OddsStage::Sources(vec![
            odds("binance", Some(dec!(0.61))),
            odds("kraken", Some(dec!(0.4))),
            odds("okx", Some(dec!(0.39))),
        ]));

        // Ranked by probability descending.
        assert_eq!(rows[0].tone, Tone::Positive);
        assert_eq!(rows[0].value, "61.0%");
        assert_eq!(rows[1].tone, Tone::Neutral);
        assert_eq!(rows[2].tone, Tone::Negative);
    }

    #[test]
    fn test_odds_labels_truncate_to_three_chars() {
        let rows = odds_rows(&OddsStage::Sources(vec![odds("binance", Some(dec!(0.5)))]));
        assert_eq!(rows[0].label, "BIN");
    }

    #[test]
    fn test_malformed_odds_entry_renders_with_fallback() {
        let rows = odds_rows(&OddsStage::Sources(vec![
            odds("binance", None),
            odds("kraken", Some(dec!(0.55))),
        ]));

        assert_eq!(rows.len(), 2);
        // Missing values rank last and render the 0 fallback without a tone.
        assert_eq!(rows[0].value, "55.0%");
        assert_eq!(rows[1].value, "0.0%");
        assert_eq!(rows[1].tone, Tone::Neutral);
    }

    #[test]
    fn test_empty_odds_yield_placeholder_row() {
        let rows = odds_rows(&OddsStage::Sources(vec![]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, PLACEHOLDER);
    }

    #[test]
    fn test_scalar_odds_pass_through() {
        let rows = odds_rows(&OddsStage::Scalar("UP 52.3¢".to_string()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "UP 52.3¢");
        assert_eq!(rows[0].tone, Tone::Neutral);
    }

    #[test]
    fn test_edge_sign_derives_direction_and_tone() {
        let rows = edge_rows(&EdgeStage::Sources(vec![edge(
            "okx",
            Some(dec!(-0.023)),
            None,
        )]));

        assert_eq!(rows[0].value, "DOWN 2.3%");
        assert_eq!(rows[0].tone, Tone::Negative);
    }

    #[test]
    fn test_edge_explicit_side_agrees_with_sign() {
        let rows = edge_rows(&EdgeStage::Sources(vec![edge(
            "binance",
            Some(dec!(0.05)),
            Some(Side::Up),
        )]));

        assert_eq!(rows[0].value, "UP 5.0%");
        assert_eq!(rows[0].tone, Tone::Positive);
    }

    #[test]
    fn test_edge_explicit_side_overrides_sign() {
        let rows = edge_rows(&EdgeStage::Sources(vec![edge(
            "binance",
            Some(dec!(-0.05)),
            Some(Side::Up),
        )]));

        // Direction follows the explicit side, tone still follows the sign.
        assert_eq!(rows[0].value, "UP 5.0%");
        assert_eq!(rows[0].tone, Tone::Negative);
    }

    #[test]
    fn test_blended_row_emphasized_not_truncated() {
        let rows = edge_rows(&EdgeStage::Sources(vec![
            edge("blend", Some(dec!(0.01)), None),
            edge("binance", Some(dec!(0.04)), None),
        ]));

        // Ranked by magnitude, so the exchange row leads.
        assert_eq!(rows[0].label, "BIN");
        assert!(!rows[0].emphasized);
        assert_eq!(rows[1].label, "BLEND");
        assert!(rows[1].emphasized);
    }

    #[test]
    fn test_malformed_edge_entry_keeps_siblings() {
        let rows = edge_rows(&EdgeStage::Sources(vec![
            edge("okx", None, None),
            edge("kraken", Some(dec!(0.02)), None),
        ]));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, "UP 2.0%");
        assert_eq!(rows[1].value, "UP 0.0%");
        assert_eq!(rows[1].tone, Tone::Neutral);
    }

    #[test]
    fn test_scalar_edge_passes_through() {
        let rows = edge_rows(&EdgeStage::Scalar("edge 0.5%".to_string()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "edge 0.5%");
    }

    #[test]
    fn test_passthrough_stages() {
        let mut pipeline = PipelineState::default();
        pipeline.kelly = "f* 2.5%".to_string();

        let views = aggregate(&pipeline);

        assert_eq!(views[3].rows[0].value, "f* 2.5%");
        // Missing execution string renders the placeholder glyph.
        assert_eq!(views[4].rows[0].value, PLACEHOLDER);
    }
}
