//! Signal pipeline state
//!
//! The bot reports how each trade decision was derived as five sequential
//! stages: exchange feeds in, per-source odds, per-source edge, sizing, and
//! the execution decision. Older bot builds emitted stages 2 and 3 as bare
//! display strings; current builds emit structured per-source arrays. Both
//! shapes deserialize here, resolved as an untagged variant per stage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decode;
use crate::position::Side;

/// Source tag reserved for the combined/blended estimate row
pub const BLENDED_SOURCE: &str = "blend";

/// Per-source probability estimate (stage 2)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOdds {
    /// Originating feed or model identifier
    #[serde(default)]
    pub source: String,

    /// Probability the market resolves UP (0.00 - 1.00)
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub prob_up: Option<Decimal>,

    /// When the estimate was produced
    #[serde(default)]
    pub time: Option<String>,
}

/// Per-source edge estimate (stage 3)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEdge {
    /// Originating feed identifier, or [`BLENDED_SOURCE`] for the combined row
    #[serde(default)]
    pub source: String,

    /// Signed edge as a fraction (e.g. -0.023 for 2.3% against)
    #[serde(default, deserialize_with = "decode::lenient_decimal")]
    pub value: Option<Decimal>,

    /// Explicit direction; when absent the sign of `value` decides
    #[serde(default, deserialize_with = "decode::lenient_side")]
    pub side: Option<Side>,
}

impl SourceEdge {
    /// Effective direction: explicit side wins, else non-negative value is UP
    pub fn direction(&self) -> Side {
        if let Some(side) = self.side {
            return side;
        }
        match self.value {
            Some(v) if v.is_sign_negative() => Side::Down,
            _ => Side::Up,
        }
    }

    /// Whether this row is the combined/blended estimate
    pub fn is_blended(&self) -> bool {
        self.source.eq_ignore_ascii_case(BLENDED_SOURCE)
    }
}

/// Stage 2 payload: structured per-source odds or the legacy display string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OddsStage {
    Sources(Vec<SourceOdds>),
    Scalar(String),
}

impl Default for OddsStage {
    fn default() -> Self {
        OddsStage::Sources(Vec::new())
    }
}

/// Stage 3 payload: structured per-source edges or the legacy display string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeStage {
    Sources(Vec<SourceEdge>),
    Scalar(String),
}

impl Default for EdgeStage {
    fn default() -> Self {
        EdgeStage::Sources(Vec::new())
    }
}

/// Five-stage signal pipeline as reported by the bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineState {
    /// Stage 1: comma-separated exchange feed identifiers
    #[serde(default)]
    pub cex_feeds: String,

    /// Stage 2: market odds per source
    #[serde(default)]
    pub pm_odds: OddsStage,

    /// Stage 3: edge per source
    #[serde(default)]
    pub edge: EdgeStage,

    /// Stage 4: sizing recommendation, display-only
    #[serde(default)]
    pub kelly: String,

    /// Stage 5: execution decision, display-only
    #[serde(default)]
    pub exec: String,
}
