//! Moving Average Convergence Divergence (MACD).
//!
//! macd = EMA(fast) - EMA(slow)
//! signal = EMA(macd, signal_period), computed over the defined region of the
//! MACD series and re-aligned to the original index space.
//! histogram = macd - signal

use super::ema::{ema, ema_of_defined};

/// MACD line, signal line, and histogram, all aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute MACD over a value series.
///
/// The MACD line is defined from index `slow - 1`, the signal line and
/// histogram from index `slow + signal_period - 2`.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let n = values.len();
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let macd_line: Vec<Option<f64>> = (0..n)
        .map(|i| match (fast_ema[i], slow_ema[i]) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal_line = ema_of_defined(&macd_line, signal_period);

    let histogram: Vec<Option<f64>> = (0..n)
        .map(|i| match (macd_line[i], signal_line[i]) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}
