//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! middle = SMA(period)
//! upper/lower = middle ± mult * stddev over the trailing window
//! Uses population stddev (divide by N).
//! Warm-up: the first `period - 1` indices are undefined.

use super::sma::sma;

/// Upper, middle, and lower bands, aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger Bands over a value series.
pub fn bollinger(values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let n = values.len();
    let middle = sma(values, period);
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];

    if period >= 1 && n >= period {
        for i in (period - 1)..n {
            let mean = match middle[i] {
                Some(m) => m,
                None => continue,
            };
            let window = &values[i + 1 - period..=i];
            let variance = window
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let stddev = variance.sqrt();

            upper[i] = Some(mean + multiplier * stddev);
            lower[i] = Some(mean - multiplier * stddev);
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
