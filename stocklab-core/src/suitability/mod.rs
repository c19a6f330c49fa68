//! Strategy suitability scoring.
//!
//! Post-hoc evaluation of how well a price series fits a trading style.
//! Each scorer blends weighted 0–100 factor scores into an overall score,
//! a tiered recommendation, and a concrete entry/exit/stop plan.

pub mod scalping;
pub mod swing;

use serde::{Deserialize, Serialize};

pub use scalping::score_scalping;
pub use swing::score_swing;

/// Tiered recommendation derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighlySuitable,
    Suitable,
    Moderate,
    NotSuitable,
}

impl Recommendation {
    /// Thresholds: ≥70 highly suitable, ≥50 suitable, ≥30 moderate.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Recommendation::HighlySuitable
        } else if score >= 50.0 {
            Recommendation::Suitable
        } else if score >= 30.0 {
            Recommendation::Moderate
        } else {
            Recommendation::NotSuitable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingStyle {
    Scalping,
    Swing,
}

/// Concrete price suggestions for acting on an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub exit: f64,
    pub stop: f64,
}

/// Result of scoring one style against one instrument snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAssessment {
    pub style: TradingStyle,
    pub score: f64,
    pub recommendation: Recommendation,
    /// Human-readable factor breakdown, in scoring order.
    pub factors: Vec<String>,
    /// Present when the snapshot carries enough indicator data to price a plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<TradePlan>,
}

/// Mean volume over the trailing `window` bars.
pub(crate) fn avg_volume(bars: &[crate::domain::PriceBar], window: usize) -> f64 {
    let tail = trailing(bars, window);
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|b| b.volume as f64).sum::<f64>() / tail.len() as f64
}

/// Mean bar range over the trailing `window` bars, as a percentage of close.
pub(crate) fn avg_range_pct(bars: &[crate::domain::PriceBar], window: usize) -> f64 {
    let tail = trailing(bars, window);
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|b| b.range_pct() * 100.0).sum::<f64>() / tail.len() as f64
}

fn trailing(bars: &[crate::domain::PriceBar], window: usize) -> &[crate::domain::PriceBar] {
    &bars[bars.len().saturating_sub(window)..]
}
