//! PriceBar — the fundamental market data unit.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument over a single timeframe interval.
///
/// Produced by the upstream data-acquisition layer, already aligned and
/// deduplicated. Ordered by time; no two bars of the same series share a
/// timestamp. Daily series leave `time` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Combined timestamp; daily bars resolve to midnight.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date
            .and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Basic OHLC sanity check: high is the top of the range, low the bottom,
    /// and prices are positive finite numbers.
    pub fn is_sane(&self) -> bool {
        let finite = self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite();
        finite
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }

    /// Bar range as a fraction of the close (intraday volatility proxy).
    pub fn range_pct(&self) -> f64 {
        if self.close <= 0.0 {
            return 0.0;
        }
        (self.high - self.low) / self.close
    }
}
