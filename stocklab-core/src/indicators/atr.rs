//! True Range and Average True Range (ATR).
//!
//! TR = max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing: seeded as the simple average of the first
//! `period` true ranges, then atr = (atr_prev·(period-1) + TR) / period.
//! TR at index 0 has no previous close and is excluded from the seed, so the
//! first ATR value lands at index `period`.

use crate::domain::PriceBar;

/// Compute the True Range series.
///
/// Index 0 is undefined (no previous close to gap against).
pub fn true_range(bars: &[PriceBar]) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut tr = vec![None; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// Compute the ATR of a bar series.
pub fn atr(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut result = vec![None; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let tr = true_range(bars);

    // Seed: mean of TR[1..=period]
    let seed: f64 = tr[1..=period].iter().flatten().sum::<f64>() / period as f64;
    result[period] = Some(seed);

    let mut prev = seed;
    for i in (period + 1)..n {
        let t = match tr[i] {
            Some(t) => t,
            None => continue,
        };
        let smoothed = (prev * (period as f64 - 1.0) + t) / period as f64;
        result[i] = Some(smoothed);
        prev = smoothed;
    }

    result
}
