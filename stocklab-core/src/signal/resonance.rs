//! Multi-timeframe signal resonance.
//!
//! Compares the latest signal from up to four timeframes of the same
//! instrument and scores how strongly they agree on a direction. A signal
//! matching the agreed direction can be boosted — the boost produces a fresh
//! copy; the input signal is never mutated.

use serde::{Deserialize, Serialize};

use crate::domain::{ResonanceTag, ResonantSignal, Signal, SignalKind};

/// The latest signal observed on one timeframe (or none yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSignal {
    pub timeframe: String,
    pub signal: Option<Signal>,
}

/// Agreement of signal direction across timeframes.
///
/// Computed fresh on each query; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceAnalysis {
    pub has_resonance: bool,
    /// Number of timeframes agreeing on the dominant direction (0–4).
    pub level: u8,
    /// The agreeing timeframes, in input order.
    pub timeframes: Vec<String>,
    pub signal_type: SignalKind,
    pub strength: f64,
    pub description: String,
}

/// Score directional agreement across the latest per-timeframe signals.
///
/// A tie between buy and sell counts reports `signal_type: Hold`; no signal
/// matches a hold direction, so a tie never boosts anything.
pub fn analyze_resonance(latest: &[TimeframeSignal]) -> ResonanceAnalysis {
    let buys: Vec<&TimeframeSignal> = directional(latest, SignalKind::Buy);
    let sells: Vec<&TimeframeSignal> = directional(latest, SignalKind::Sell);

    let (signal_type, agreeing) = if buys.len() > sells.len() {
        (SignalKind::Buy, buys)
    } else if sells.len() > buys.len() {
        (SignalKind::Sell, sells)
    } else {
        (SignalKind::Hold, Vec::new())
    };

    let level = agreeing.len().max(buys_sells_max(latest)) as u8;
    let has_resonance = level >= 2;

    let timeframes: Vec<String> = agreeing.iter().map(|t| t.timeframe.clone()).collect();

    let strength = if agreeing.is_empty() {
        0.0
    } else {
        let n = agreeing.len() as f64;
        let mean_strength = agreeing
            .iter()
            .filter_map(|t| t.signal.as_ref())
            .map(|s| s.strength)
            .sum::<f64>()
            / n;
        let mean_confidence = agreeing
            .iter()
            .filter_map(|t| t.signal.as_ref())
            .map(|s| s.confidence)
            .sum::<f64>()
            / n;
        (level as f64 * 20.0 + mean_strength * 0.4 + mean_confidence * 0.4).min(100.0)
    };

    let description = match (has_resonance, signal_type) {
        (true, kind) if kind.is_directional() => {
            let dir = if kind == SignalKind::Buy { "buy" } else { "sell" };
            format!("{level} timeframes agree on {dir}: {}", timeframes.join(", "))
        }
        (true, _) => format!("{level} timeframes split evenly between buy and sell"),
        (false, _) => "no timeframe agreement".to_string(),
    };

    ResonanceAnalysis {
        has_resonance,
        level,
        timeframes,
        signal_type,
        strength,
        description,
    }
}

/// Boost a signal that matches the resonance direction.
///
/// Returns `None` when there is no resonance or the signal points the other
/// way. Strength gains `level·5`, confidence `level·10`, both clamped to 100.
pub fn boost_signal(signal: &Signal, analysis: &ResonanceAnalysis) -> Option<ResonantSignal> {
    if !analysis.has_resonance || signal.kind != analysis.signal_type {
        return None;
    }

    let level = analysis.level as f64;
    let mut boosted = signal.clone();
    boosted.strength = (boosted.strength + level * 5.0).min(100.0);
    boosted.confidence = (boosted.confidence + level * 10.0).min(100.0);

    Some(ResonantSignal {
        signal: boosted,
        resonance: ResonanceTag {
            level: analysis.level,
            timeframes: analysis.timeframes.clone(),
        },
    })
}

fn directional(latest: &[TimeframeSignal], kind: SignalKind) -> Vec<&TimeframeSignal> {
    latest
        .iter()
        .filter(|t| t.signal.as_ref().is_some_and(|s| s.kind == kind))
        .collect()
}

/// Max of buy and sell counts, for the tie case where `agreeing` is empty.
fn buys_sells_max(latest: &[TimeframeSignal]) -> usize {
    let buys = directional(latest, SignalKind::Buy).len();
    let sells = directional(latest, SignalKind::Sell).len();
    buys.max(sells)
}
