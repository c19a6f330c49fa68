//! KDJ stochastic oscillator.
//!
//! RSV = (close - LLV(low, n)) / (HHV(high, n) - LLV(low, n)) * 100
//!       (50 on a zero-range window)
//! K = (2·K_prev + RSV) / 3, D = (2·D_prev + K) / 3, J = 3K - 2D
//! K and D are seeded at 50. Warm-up: the first `n - 1` indices are undefined.

use crate::domain::PriceBar;

/// K, D, and J lines, aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct KdjSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub j: Vec<Option<f64>>,
}

/// Compute KDJ over a bar series with an `n`-bar RSV window.
pub fn kdj(bars: &[PriceBar], n: usize) -> KdjSeries {
    let len = bars.len();
    let mut k_out = vec![None; len];
    let mut d_out = vec![None; len];
    let mut j_out = vec![None; len];

    if n == 0 || len < n {
        return KdjSeries {
            k: k_out,
            d: d_out,
            j: j_out,
        };
    }

    let mut k_prev = 50.0;
    let mut d_prev = 50.0;

    for i in (n - 1)..len {
        let window = &bars[i + 1 - n..=i];
        let hhv = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let llv = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        let rsv = if hhv == llv {
            50.0
        } else {
            (bars[i].close - llv) / (hhv - llv) * 100.0
        };

        let k = (2.0 * k_prev + rsv) / 3.0;
        let d = (2.0 * d_prev + k) / 3.0;
        let j = 3.0 * k - 2.0 * d;

        k_out[i] = Some(k);
        d_out[i] = Some(d);
        j_out[i] = Some(j);

        k_prev = k;
        d_prev = d;
    }

    KdjSeries {
        k: k_out,
        d: d_out,
        j: j_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_bars, make_ohlc_bars};

    #[test]
    fn kdj_warmup_shape() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let kdj = kdj(&bars, 3);
        assert!(kdj.k[0].is_none());
        assert!(kdj.k[1].is_none());
        assert!(kdj.k[2].is_some());
        assert!(kdj.d[2].is_some());
        assert!(kdj.j[2].is_some());
    }

    #[test]
    fn kdj_zero_range_window_is_neutral() {
        // All bars identical: high == low over any window → RSV = 50,
        // and with K, D seeded at 50 the lines stay pinned at 50.
        let bars = make_ohlc_bars(&[(100.0, 100.0, 100.0, 100.0); 6]);
        let kdj = kdj(&bars, 3);
        for i in 2..6 {
            assert!((kdj.k[i].unwrap() - 50.0).abs() < 1e-10);
            assert!((kdj.d[i].unwrap() - 50.0).abs() < 1e-10);
            assert!((kdj.j[i].unwrap() - 50.0).abs() < 1e-10);
        }
    }

    #[test]
    fn kdj_close_at_window_high() {
        // Close pinned to the window high → RSV = 100 → K rises toward 100.
        let bars = make_ohlc_bars(&[
            (10.0, 11.0, 9.0, 11.0),
            (11.0, 12.0, 10.0, 12.0),
            (12.0, 13.0, 11.0, 13.0),
            (13.0, 14.0, 12.0, 14.0),
            (14.0, 15.0, 13.0, 15.0),
        ]);
        let kdj = kdj(&bars, 3);
        let ks: Vec<f64> = kdj.k.iter().flatten().copied().collect();
        // RSV = 100 every bar, so K climbs monotonically from the 50 seed.
        for w in ks.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!(ks[0] > 50.0);
    }

    #[test]
    fn kdj_j_identity() {
        let bars = make_bars(&[10.0, 12.0, 9.0, 14.0, 11.0, 13.0]);
        let kdj = kdj(&bars, 3);
        for i in 0..6 {
            if let (Some(k), Some(d), Some(j)) = (kdj.k[i], kdj.d[i], kdj.j[i]) {
                assert!((j - (3.0 * k - 2.0 * d)).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn kdj_short_series_all_undefined() {
        let bars = make_bars(&[10.0, 11.0]);
        let kdj = kdj(&bars, 9);
        assert!(kdj.k.iter().all(|v| v.is_none()));
    }
}
