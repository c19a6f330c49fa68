//! Multi-factor signal generator.
//!
//! Walks an indicator frame series and accumulates weighted evidence per bar:
//! RSI extremes, MACD histogram crosses, Bollinger band breaches,
//! support/resistance confirmation, and volume surges. A signal is emitted
//! only when at least two rules fire on the winning side and its accumulated
//! strength clears the minimum threshold, so output is sparse — most bars
//! produce nothing.

use tracing::debug;

use super::levels::detect_levels;
use crate::domain::{Signal, SignalKind};
use crate::indicators::IndicatorFrame;

/// Bars required before the generator produces directional signals.
pub const MIN_BARS_FOR_SIGNALS: usize = 60;

/// First bar index evaluated (indicator warm-up headroom).
const FIRST_EVAL_INDEX: usize = 30;

/// Trailing window scanned for support/resistance levels.
const LEVEL_LOOKBACK: usize = 60;
/// Pivot confirmation width for level detection.
const LEVEL_PIVOT_SPAN: usize = 3;
/// Proximity to a level that counts as "at the level".
const LEVEL_PROXIMITY: f64 = 0.005;

/// Volume vs. trailing 5-bar average that counts as a surge.
const VOLUME_SURGE_RATIO: f64 = 2.0;
const VOLUME_WINDOW: usize = 5;

const MIN_RULES: usize = 2;
const MIN_STRENGTH: f64 = 40.0;

/// Default protective exits quoted on emitted signals, as fractions of the
/// signal price. Callers with an ATR model may override downstream.
const DEFAULT_STOP_PCT: f64 = 0.02;
const DEFAULT_TARGET_PCT: f64 = 0.03;

/// Evidence accumulated for one side (bullish or bearish) at one bar.
#[derive(Debug, Default)]
struct Evidence {
    strength: f64,
    rules: usize,
    reasons: Vec<String>,
}

impl Evidence {
    fn add(&mut self, weight: f64, reason: String) {
        self.strength += weight;
        self.rules += 1;
        self.reasons.push(reason);
    }
}

/// Generate trading signals from an indicator frame series.
///
/// Degrades rather than fails: fewer than 2 bars yields a single neutral
/// hold signal (or nothing for an empty series); fewer than
/// [`MIN_BARS_FOR_SIGNALS`] bars yields an empty list.
pub fn generate_signals(frames: &[IndicatorFrame]) -> Vec<Signal> {
    match frames.len() {
        0 => return Vec::new(),
        1 => {
            let bar = &frames[0].bar;
            return vec![Signal::neutral_hold(
                bar.date,
                bar.time,
                bar.close,
                "insufficient data",
            )];
        }
        n if n < MIN_BARS_FOR_SIGNALS => return Vec::new(),
        _ => {}
    }

    let mut signals = Vec::new();

    for i in FIRST_EVAL_INDEX..frames.len() {
        if let Some(signal) = evaluate_bar(frames, i) {
            debug!(
                date = %signal.date,
                kind = ?signal.kind,
                strength = signal.strength,
                "signal emitted"
            );
            signals.push(signal);
        }
    }

    signals
}

fn evaluate_bar(frames: &[IndicatorFrame], i: usize) -> Option<Signal> {
    let frame = &frames[i];
    let prev = &frames[i - 1];
    let close = frame.bar.close;

    let mut bull = Evidence::default();
    let mut bear = Evidence::default();

    // RSI extremes
    if let Some(r) = frame.rsi {
        if r < 30.0 {
            bull.add(25.0, format!("RSI oversold ({r:.1})"));
        } else if r > 70.0 {
            bear.add(25.0, format!("RSI overbought ({r:.1})"));
        }
    }

    // MACD histogram crossing zero
    if let (Some(hist), Some(prev_hist)) = (frame.macd_histogram, prev.macd_histogram) {
        if prev_hist <= 0.0 && hist > 0.0 {
            bull.add(30.0, "MACD golden cross".to_string());
        } else if prev_hist >= 0.0 && hist < 0.0 {
            bear.add(30.0, "MACD dead cross".to_string());
        }
    }

    // Bollinger band breach (mean reversion)
    if let Some(lower) = frame.bollinger_lower {
        if close < lower {
            bull.add(20.0, "price below lower Bollinger band".to_string());
        }
    }
    if let Some(upper) = frame.bollinger_upper {
        if close > upper {
            bear.add(20.0, "price above upper Bollinger band".to_string());
        }
    }

    // Support/resistance confirmation
    let moved_up = close > prev.bar.close;
    let moved_down = close < prev.bar.close;
    let window_start = (i + 1).saturating_sub(LEVEL_LOOKBACK);
    let window: Vec<_> = frames[window_start..=i].iter().map(|f| f.bar.clone()).collect();
    let levels = detect_levels(&window, LEVEL_PIVOT_SPAN);

    if let Some(support) = levels.nearest_support(close * (1.0 + LEVEL_PROXIMITY)) {
        if (close - support).abs() / support <= LEVEL_PROXIMITY && moved_up {
            bull.add(15.0, format!("bounce off support {support:.2}"));
        }
    }
    if let Some(resistance) = levels.nearest_resistance(close * (1.0 - LEVEL_PROXIMITY)) {
        if (resistance - close).abs() / resistance <= LEVEL_PROXIMITY && moved_down {
            bear.add(15.0, format!("rejected at resistance {resistance:.2}"));
        }
    }

    // Volume surge amplifies the bar's direction
    if i >= VOLUME_WINDOW {
        let avg_volume = frames[i - VOLUME_WINDOW..i]
            .iter()
            .map(|f| f.bar.volume as f64)
            .sum::<f64>()
            / VOLUME_WINDOW as f64;
        if avg_volume > 0.0 && frame.bar.volume as f64 >= VOLUME_SURGE_RATIO * avg_volume {
            let ratio = frame.bar.volume as f64 / avg_volume;
            if moved_up {
                bull.add(10.0, format!("volume surge on up move ({ratio:.1}x)"));
            } else if moved_down {
                bear.add(10.0, format!("volume surge on down move ({ratio:.1}x)"));
            }
        }
    }

    // Decide direction; ties are not emitted.
    let (kind, evidence) = if bull.strength > bear.strength {
        (SignalKind::Buy, bull)
    } else if bear.strength > bull.strength {
        (SignalKind::Sell, bear)
    } else {
        return None;
    };

    if evidence.rules < MIN_RULES || evidence.strength < MIN_STRENGTH {
        return None;
    }

    let strength = evidence.strength.min(100.0);
    let confidence = (30.0 + 10.0 * evidence.rules as f64 + 0.3 * strength).min(100.0);

    let (stop_loss, take_profit) = match kind {
        SignalKind::Buy => (
            close * (1.0 - DEFAULT_STOP_PCT),
            close * (1.0 + DEFAULT_TARGET_PCT),
        ),
        SignalKind::Sell => (
            close * (1.0 + DEFAULT_STOP_PCT),
            close * (1.0 - DEFAULT_TARGET_PCT),
        ),
        SignalKind::Hold => unreachable!(),
    };

    Some(Signal {
        date: frame.bar.date,
        time: frame.bar.time,
        kind,
        price: close,
        strength,
        confidence,
        reasons: evidence.reasons,
        stop_loss: Some(stop_loss),
        take_profit: Some(take_profit),
    })
}
