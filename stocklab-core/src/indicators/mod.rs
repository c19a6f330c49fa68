//! Technical indicators.
//!
//! Pure free functions: numeric series in, same-length series out. Indices
//! inside the warm-up window hold `None` — there is no NaN sentinel anywhere
//! in this crate, so undefined values can never leak into arithmetic.
//!
//! # Look-ahead contamination guard
//! No indicator value at bar t may depend on data from bar t+1 or later.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod frame;
pub mod kdj;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::{atr, true_range};
pub use bollinger::{bollinger, BollingerBands};
pub use ema::{ema, ema_of_defined};
pub use frame::{compute_frames, FrameParams, IndicatorFrame};
pub use kdj::{kdj, KdjSeries};
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;
pub use sma::sma;

/// Extract the close series from bars.
pub fn closes(bars: &[crate::domain::PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                time: None,
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| PriceBar {
            date: base_date + chrono::Duration::days(i as i64),
            time: None,
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert an optional value is defined and approximately equal to `expected`.
#[cfg(test)]
pub fn assert_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    let actual = actual.expect("expected a defined indicator value, got None");
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
