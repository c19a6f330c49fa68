//! Scalping suitability.
//!
//! Scalping wants deep liquidity, a price oscillating inside a narrow band,
//! and low intraday volatility:
//! score = liquidity·0.40 + oscillation·0.35 + calmness·0.25

use super::{avg_range_pct, avg_volume, Recommendation, StyleAssessment, TradePlan, TradingStyle};
use crate::domain::PriceBar;
use crate::indicators::IndicatorFrame;

/// Trailing window for volume and range statistics.
const STATS_WINDOW: usize = 20;

/// Average volume granting the full liquidity score.
const FULL_LIQUIDITY_VOLUME: f64 = 5_000_000.0;

/// Bollinger bandwidth (as a fraction of the middle band) below which the
/// band is considered tight enough for scalping.
const TIGHT_BANDWIDTH: f64 = 0.05;

/// Score how well the instrument currently fits a scalping style.
pub fn score_scalping(bars: &[PriceBar], frame: &IndicatorFrame) -> StyleAssessment {
    let mut factors = Vec::new();

    // Liquidity: trailing average volume, capped at 5M shares.
    let volume = avg_volume(bars, STATS_WINDOW);
    let liquidity = (volume / FULL_LIQUIDITY_VOLUME * 100.0).min(100.0);
    factors.push(format!("avg volume {volume:.0} → liquidity {liquidity:.0}"));

    // Oscillation: RSI near the middle of its range, tight Bollinger band.
    let rsi_score = match frame.rsi {
        Some(r) if (30.0..=70.0).contains(&r) => 100.0 - (r - 50.0).abs() * 2.5,
        Some(_) => 20.0,
        None => 50.0,
    };
    let bandwidth = match (frame.bollinger_upper, frame.bollinger_middle, frame.bollinger_lower) {
        (Some(u), Some(m), Some(l)) if m > 0.0 => Some((u - l) / m),
        _ => None,
    };
    let band_score = match bandwidth {
        Some(bw) => ((1.0 - bw / TIGHT_BANDWIDTH) * 100.0).clamp(0.0, 100.0),
        None => 50.0,
    };
    let oscillation = (rsi_score + band_score) / 2.0;
    match bandwidth {
        Some(bw) => factors.push(format!(
            "band width {:.1}% → oscillation {oscillation:.0}",
            bw * 100.0
        )),
        None => factors.push(format!("bands warming up → oscillation {oscillation:.0}")),
    }

    // Calmness: intraday volatility penalizes the score tenfold.
    let volatility = avg_range_pct(bars, STATS_WINDOW);
    let calmness = (100.0 - volatility * 10.0).clamp(0.0, 100.0);
    factors.push(format!("intraday range {volatility:.2}% → calmness {calmness:.0}"));

    let score = liquidity * 0.40 + oscillation * 0.35 + calmness * 0.25;

    StyleAssessment {
        style: TradingStyle::Scalping,
        score,
        recommendation: Recommendation::from_score(score),
        factors,
        plan: plan(frame),
    }
}

/// Tight plan off the Bollinger envelope: buy the lower band, sell the
/// upper, bail 1% under the entry.
fn plan(frame: &IndicatorFrame) -> Option<TradePlan> {
    let entry = frame.bollinger_lower?;
    let exit = frame.bollinger_upper?;
    if entry <= 0.0 || exit <= entry {
        return None;
    }
    Some(TradePlan {
        entry,
        exit,
        stop: entry * 0.99,
    })
}
