//! Criterion benchmarks for StockLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator frame precompute (full indicator set over a series)
//! 2. Signal generation (multi-factor scoring with level detection)
//! 3. Full backtest run (bar loop + statistics)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stocklab_core::backtest::{run_backtest, BacktestConfig};
use stocklab_core::data::random_walk;
use stocklab_core::indicators::{compute_frames, FrameParams};
use stocklab_core::signal::generate_signals;

fn bench_compute_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_frames");
    for n in [250_usize, 1000, 5000] {
        let bars = random_walk(42, n, 100.0);
        let params = FrameParams::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| compute_frames(black_box(bars), black_box(&params)));
        });
    }
    group.finish();
}

fn bench_generate_signals(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_signals");
    for n in [250_usize, 1000] {
        let bars = random_walk(42, n, 100.0);
        let frames = compute_frames(&bars, &FrameParams::default());
        group.bench_with_input(BenchmarkId::from_parameter(n), &frames, |b, frames| {
            b.iter(|| generate_signals(black_box(frames)));
        });
    }
    group.finish();
}

fn bench_run_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_backtest");
    for n in [250_usize, 1000, 5000] {
        let bars = random_walk(42, n, 100.0);
        let config = BacktestConfig {
            rsi_period: 5,
            rsi_oversold: 40.0,
            use_trend_filter: true,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| run_backtest(black_box(bars), black_box(&config)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compute_frames,
    bench_generate_signals,
    bench_run_backtest
);
criterion_main!(benches);
