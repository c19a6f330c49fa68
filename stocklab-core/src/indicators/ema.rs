//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: EMA[period-1] = SMA of the first `period` values.
//! Warm-up: the first `period - 1` indices are undefined.

/// Compute the EMA of a value series.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of first `period` values
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..n {
        let e = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = Some(e);
        prev = e;
    }

    result
}

/// Compute the EMA over the defined region of an optional series,
/// re-aligned to the original index space.
///
/// The defined region is the contiguous suffix starting at the first `Some`
/// (which is how every indicator in this crate shapes its output). Used for
/// EMAs of derived series, e.g. the MACD signal line.
pub fn ema_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];

    let offset = match values.iter().position(|v| v.is_some()) {
        Some(o) => o,
        None => return result,
    };

    let defined: Vec<f64> = values[offset..].iter().map_while(|v| *v).collect();
    let inner = ema(&defined, period);

    for (i, v) in inner.into_iter().enumerate() {
        result[offset + i] = v;
    }

    result
}
