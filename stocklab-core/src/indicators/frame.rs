//! IndicatorFrame — one bar augmented with every computed indicator.
//!
//! Frames are precomputed once per series and fed to the signal generator
//! and suitability scorer. Recomputing from the same bars yields identical
//! output; nothing here holds hidden state.

use serde::{Deserialize, Serialize};

use super::{atr, bollinger, closes, kdj, macd, rsi, sma};
use crate::domain::PriceBar;

/// Indicator periods used when assembling frames.
///
/// Defaults mirror the dashboard's chart set: MA 5/10/20/60, RSI 14,
/// MACD 12/26/9, Bollinger 20/2.0, KDJ 9, ATR 14.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_mult: f64,
    pub kdj_n: usize,
    pub atr_period: usize,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_mult: 2.0,
            kdj_n: 9,
            atr_period: 14,
        }
    }
}

/// A price bar plus its indicator snapshot.
///
/// `None` marks values still inside their warm-up window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub bar: PriceBar,
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub kdj_k: Option<f64>,
    pub kdj_d: Option<f64>,
    pub kdj_j: Option<f64>,
    pub atr: Option<f64>,
}

/// Compute the full indicator frame series for a bar series.
pub fn compute_frames(bars: &[PriceBar], params: &FrameParams) -> Vec<IndicatorFrame> {
    let close = closes(bars);

    let ma5 = sma(&close, 5);
    let ma10 = sma(&close, 10);
    let ma20 = sma(&close, 20);
    let ma60 = sma(&close, 60);
    let rsi_series = rsi(&close, params.rsi_period);
    let macd_series = macd(&close, params.macd_fast, params.macd_slow, params.macd_signal);
    let boll = bollinger(&close, params.bollinger_period, params.bollinger_mult);
    let kdj_series = kdj(bars, params.kdj_n);
    let atr_series = atr(bars, params.atr_period);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorFrame {
            bar: bar.clone(),
            ma5: ma5[i],
            ma10: ma10[i],
            ma20: ma20[i],
            ma60: ma60[i],
            rsi: rsi_series[i],
            macd: macd_series.macd[i],
            macd_signal: macd_series.signal[i],
            macd_histogram: macd_series.histogram[i],
            bollinger_upper: boll.upper[i],
            bollinger_middle: boll.middle[i],
            bollinger_lower: boll.lower[i],
            kdj_k: kdj_series.k[i],
            kdj_d: kdj_series.d[i],
            kdj_j: kdj_series.j[i],
            atr: atr_series[i],
        })
        .collect()
}
