//! StockLab Core — the quantitative signal and backtesting engine.
//!
//! This crate turns a raw OHLCV price series into:
//! - Technical indicators (SMA, EMA, RSI, MACD, Bollinger, KDJ, ATR)
//! - Discrete buy/sell/hold signals with strength and confidence scores
//! - FIFO-paired round-trip trades with realized profit/loss
//! - A bar-by-bar backtest with position sizing, stops, and transaction costs
//! - Multi-timeframe signal resonance and strategy-suitability scores
//!
//! Everything is a pure, synchronous computation over in-memory series:
//! no I/O, no globals, no interior mutability. Independent runs over
//! different symbols or configs can execute in parallel; each call owns
//! its inputs and outputs.

pub mod backtest;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod signal;
pub mod suitability;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything crossing a thread boundary is Send + Sync.
    ///
    /// Parallel sweeps move configs, results, and assessments across rayon
    /// workers; this breaks the build immediately if a type loses the bound.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<domain::PairedSignal>();
        require_sync::<domain::PairedSignal>();
        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();
        require_send::<domain::EquityPoint>();
        require_sync::<domain::EquityPoint>();

        require_send::<indicators::IndicatorFrame>();
        require_sync::<indicators::IndicatorFrame>();

        require_send::<backtest::BacktestConfig>();
        require_sync::<backtest::BacktestConfig>();
        require_send::<backtest::BacktestResult>();
        require_sync::<backtest::BacktestResult>();

        require_send::<signal::ResonanceAnalysis>();
        require_sync::<signal::ResonanceAnalysis>();
        require_send::<suitability::StyleAssessment>();
        require_sync::<suitability::StyleAssessment>();
    }
}
