//! Seeded random-walk OHLCV generator.
//!
//! Used by the CLI `synth` command and the benches. Same seed, same series —
//! the generator owns its RNG and touches no global state.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::PriceBar;

/// Generate `n` daily bars of a geometric random walk starting at `start_price`.
pub fn random_walk(seed: u64, n: usize, start_price: f64) -> Vec<PriceBar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start_date = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();

    let mut bars = Vec::with_capacity(n);
    let mut close = start_price;

    for i in 0..n {
        let open = close;
        let daily_return = 0.0002 + rng.gen_range(-0.02..0.02);
        close = (open * (1.0 + daily_return)).max(0.01);

        let wick = open.max(close) * rng.gen_range(0.001..0.012);
        let high = open.max(close) + wick;
        let low = (open.min(close) - wick).max(0.01);
        let volume = rng.gen_range(500_000..5_000_000);

        bars.push(PriceBar {
            date: start_date + Duration::days(i as i64),
            time: None,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars
}
