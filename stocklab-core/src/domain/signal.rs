//! Trading signals and their enrichment layers.
//!
//! A [`Signal`] is immutable once the generator emits it. Later passes do not
//! mutate it: the trade pairer wraps signals in [`PairedSignal`] and the
//! resonance analyzer produces [`ResonantSignal`] copies, so each pass stays
//! side-effect-free and independently testable.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub fn is_directional(self) -> bool {
        !matches!(self, SignalKind::Hold)
    }
}

/// A discrete trading signal emitted by the multi-factor generator.
///
/// `strength` and `confidence` are both on a 0–100 scale. `reasons` lists the
/// rules that fired, in evaluation order, for display in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub kind: SignalKind,
    pub price: f64,
    pub strength: f64,
    pub confidence: f64,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
}

impl Signal {
    /// A neutral hold signal, used when a series is too short to analyze.
    pub fn neutral_hold(date: NaiveDate, time: Option<NaiveTime>, price: f64, reason: &str) -> Self {
        Self {
            date,
            time,
            kind: SignalKind::Hold,
            price,
            strength: 0.0,
            confidence: 0.0,
            reasons: vec![reason.to_string()],
            stop_loss: None,
            take_profit: None,
        }
    }
}

/// Round-trip pairing data attached to a matched buy or sell signal.
///
/// `counterpart` is the index of the paired signal within the same list.
/// Profit is always quoted from the buy side: `sell_price - buy_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub trade_id: u64,
    pub counterpart: usize,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
}

/// A signal plus its (optional) round-trip pairing.
///
/// Output of the FIFO trade pairer; preserves the input list's order and
/// length. Unmatched signals carry `pairing: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSignal {
    #[serde(flatten)]
    pub signal: Signal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing: Option<Pairing>,
}

/// Multi-timeframe agreement attached to a boosted signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceTag {
    pub level: u8,
    pub timeframes: Vec<String>,
}

/// A signal whose strength/confidence were boosted by timeframe resonance.
///
/// Holds a fresh copy of the input signal with the boost applied; the
/// original is untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonantSignal {
    #[serde(flatten)]
    pub signal: Signal,
    pub resonance: ResonanceTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_signal() -> Signal {
        Signal {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            time: None,
            kind: SignalKind::Buy,
            price: 52.3,
            strength: 65.0,
            confidence: 70.0,
            reasons: vec!["RSI oversold (27.1)".into(), "MACD golden cross".into()],
            stop_loss: Some(51.25),
            take_profit: Some(53.87),
        }
    }

    #[test]
    fn signal_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SignalKind::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&SignalKind::Hold).unwrap(), "\"hold\"");
    }

    #[test]
    fn hold_is_not_directional() {
        assert!(SignalKind::Buy.is_directional());
        assert!(SignalKind::Sell.is_directional());
        assert!(!SignalKind::Hold.is_directional());
    }

    #[test]
    fn neutral_hold_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let s = Signal::neutral_hold(date, None, 10.0, "insufficient data");
        assert_eq!(s.kind, SignalKind::Hold);
        assert_eq!(s.strength, 0.0);
        assert_eq!(s.reasons, vec!["insufficient data".to_string()]);
        assert!(s.stop_loss.is_none());
    }

    #[test]
    fn paired_signal_flattens_in_json() {
        let paired = PairedSignal {
            signal: sample_signal(),
            pairing: Some(Pairing {
                trade_id: 1,
                counterpart: 4,
                profit_loss: 1.7,
                profit_loss_percent: 3.25,
            }),
        };
        let json = serde_json::to_value(&paired).unwrap();
        // Base fields and pairing sit at the same level for the dashboard.
        assert_eq!(json["kind"], "buy");
        assert_eq!(json["pairing"]["trade_id"], 1);
    }

    #[test]
    fn signal_roundtrip() {
        let s = sample_signal();
        let json = serde_json::to_string(&s).unwrap();
        let deser: Signal = serde_json::from_str(&json).unwrap();
        assert_eq!(s, deser);
    }
}
