//! EquityPoint — one snapshot of simulated portfolio value per bar.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Round a monetary value to 2 decimals at the presentation boundary.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Portfolio value snapshot at one bar's close.
///
/// Invariant: `equity == cash + position_value` within a cent. The fields are
/// rounded for presentation; the simulator's running state is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub equity: f64,
    pub cash: f64,
    pub position_value: f64,
}

impl EquityPoint {
    /// Build a snapshot from unrounded running state.
    ///
    /// `equity` is derived as the rounded sum of the unrounded parts, so the
    /// cent-level identity holds regardless of how the parts round.
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, cash: f64, position_value: f64) -> Self {
        Self {
            date,
            time,
            equity: round2(cash + position_value),
            cash: round2(cash),
            position_value: round2(position_value),
        }
    }
}
