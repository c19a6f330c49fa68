//! Support and resistance detection from swing pivots.
//!
//! A pivot high is a bar whose high tops every bar within `span` bars on both
//! sides; pivot lows mirror that. Pivots closer together than 1% are merged
//! into a single averaged level.

use crate::domain::PriceBar;

/// Fraction within which two pivot prices are considered the same level.
const CLUSTER_TOLERANCE: f64 = 0.01;

/// Detected support and resistance levels, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl PriceLevels {
    /// Highest support strictly below `price`.
    pub fn nearest_support(&self, price: f64) -> Option<f64> {
        self.support
            .iter()
            .copied()
            .filter(|&s| s < price)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.max(s))))
    }

    /// Lowest resistance strictly above `price`.
    pub fn nearest_resistance(&self, price: f64) -> Option<f64> {
        self.resistance
            .iter()
            .copied()
            .filter(|&r| r > price)
            .fold(None, |acc, r| Some(acc.map_or(r, |a: f64| a.min(r))))
    }
}

/// Detect support/resistance levels over a bar window.
///
/// `span` is the pivot confirmation width on each side; bars within `span`
/// of either edge cannot confirm a pivot and are skipped.
pub fn detect_levels(bars: &[PriceBar], span: usize) -> PriceLevels {
    let n = bars.len();
    if span == 0 || n < 2 * span + 1 {
        return PriceLevels::default();
    }

    let mut highs = Vec::new();
    let mut lows = Vec::new();

    for i in span..(n - span) {
        let window = &bars[i - span..=i + span];
        let h = bars[i].high;
        let l = bars[i].low;
        if window.iter().all(|b| b.high <= h) {
            highs.push(h);
        }
        if window.iter().all(|b| b.low >= l) {
            lows.push(l);
        }
    }

    PriceLevels {
        support: cluster(lows),
        resistance: cluster(highs),
    }
}

/// Merge prices within `CLUSTER_TOLERANCE` of each other into averaged levels.
fn cluster(mut prices: Vec<f64>) -> Vec<f64> {
    if prices.is_empty() {
        return prices;
    }
    prices.sort_by(|a, b| a.total_cmp(b));

    let mut levels = Vec::new();
    let mut group = vec![prices[0]];

    for &p in &prices[1..] {
        let anchor = group[0];
        if anchor > 0.0 && (p - anchor) / anchor <= CLUSTER_TOLERANCE {
            group.push(p);
        } else {
            levels.push(group.iter().sum::<f64>() / group.len() as f64);
            group = vec![p];
        }
    }
    levels.push(group.iter().sum::<f64>() / group.len() as f64);

    levels
}
