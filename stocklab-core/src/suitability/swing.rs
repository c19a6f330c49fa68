//! Swing suitability.
//!
//! Swing trading wants a clear trend, a healthy (but not violent) daily
//! range, and well-separated support/resistance to trade between:
//! score = trend·0.40 + volatility·0.35 + clarity·0.25

use super::{avg_range_pct, Recommendation, StyleAssessment, TradePlan, TradingStyle};
use crate::domain::PriceBar;
use crate::indicators::IndicatorFrame;
use crate::signal::levels::detect_levels;

/// Trailing window for range statistics.
const STATS_WINDOW: usize = 20;

/// Trailing window and pivot span for level detection.
const LEVEL_LOOKBACK: usize = 60;
const LEVEL_PIVOT_SPAN: usize = 3;

/// Average daily range band (percent) granting the full volatility score.
const RANGE_SWEET_LOW: f64 = 3.0;
const RANGE_SWEET_HIGH: f64 = 8.0;

/// Support/resistance gap band (percent of price) granting full clarity.
const GAP_SWEET_LOW: f64 = 5.0;
const GAP_SWEET_HIGH: f64 = 15.0;

/// Score how well the instrument currently fits a swing style.
pub fn score_swing(bars: &[PriceBar], frame: &IndicatorFrame) -> StyleAssessment {
    let mut factors = Vec::new();

    // Trend: MACD above zero plus bullish moving-average ordering.
    let macd_score = match frame.macd {
        Some(m) if m > 0.0 => 50.0,
        Some(_) => 0.0,
        None => 25.0,
    };
    let ma_score = match (frame.ma5, frame.ma10, frame.ma20) {
        (Some(a), Some(b), Some(c)) if a > b && b > c => 50.0,
        (Some(a), Some(b), _) if a > b => 25.0,
        (None, _, _) => 25.0,
        _ => 0.0,
    };
    let trend = macd_score + ma_score;
    factors.push(format!("trend strength {trend:.0}"));

    // Volatility: average daily range, ideal between 3% and 8%.
    let range = avg_range_pct(bars, STATS_WINDOW);
    let volatility = if (RANGE_SWEET_LOW..=RANGE_SWEET_HIGH).contains(&range) {
        100.0
    } else if range < RANGE_SWEET_LOW {
        range / RANGE_SWEET_LOW * 100.0
    } else {
        (100.0 - (range - RANGE_SWEET_HIGH) * 12.5).clamp(0.0, 100.0)
    };
    factors.push(format!("avg range {range:.2}% → volatility {volatility:.0}"));

    // Clarity: distance between the levels bracketing the current price.
    let close = frame.bar.close;
    let window = &bars[bars.len().saturating_sub(LEVEL_LOOKBACK)..];
    let levels = detect_levels(window, LEVEL_PIVOT_SPAN);
    let bracket = levels
        .nearest_support(close)
        .zip(levels.nearest_resistance(close));
    let clarity = match bracket {
        Some((support, resistance)) if close > 0.0 => {
            let gap = (resistance - support) / close * 100.0;
            let score = if (GAP_SWEET_LOW..=GAP_SWEET_HIGH).contains(&gap) {
                100.0
            } else if gap < GAP_SWEET_LOW {
                gap / GAP_SWEET_LOW * 100.0
            } else {
                (100.0 - (gap - GAP_SWEET_HIGH) * 10.0).clamp(0.0, 100.0)
            };
            factors.push(format!("support/resistance gap {gap:.1}% → clarity {score:.0}"));
            score
        }
        _ => {
            factors.push("no clear support/resistance bracket".to_string());
            0.0
        }
    };

    let score = trend * 0.40 + volatility * 0.35 + clarity * 0.25;

    StyleAssessment {
        style: TradingStyle::Swing,
        score,
        recommendation: Recommendation::from_score(score),
        factors,
        plan: plan(frame, &bracket),
    }
}

/// Buy near support (or the 20-bar mean), target just under resistance,
/// stop a little below the support shelf.
fn plan(frame: &IndicatorFrame, bracket: &Option<(f64, f64)>) -> Option<TradePlan> {
    match bracket {
        Some((support, resistance)) => Some(TradePlan {
            entry: support * 1.005,
            exit: resistance * 0.995,
            stop: support * 0.98,
        }),
        None => {
            let ma20 = frame.ma20?;
            Some(TradePlan {
                entry: ma20,
                exit: ma20 * 1.08,
                stop: ma20 * 0.97,
            })
        }
    }
}
