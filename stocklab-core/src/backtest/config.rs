//! Backtest configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Moving-average flavor used by the trend filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaType {
    Sma,
    Ema,
}

/// Immutable parameter bundle for a single backtest run.
///
/// The simulator never mutates it; clone it to vary parameters across runs.
/// Fields whose feature flag is off (`ma_type` without the trend filter,
/// `atr_multiplier` without the ATR stop) and the MACD periods are accepted
/// and ignored by the simulator's entry/exit rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub use_trend_filter: bool,
    pub ma_period: usize,
    pub ma_type: MaType,
    /// Fraction of current cash allocated per entry, in (0, 1].
    pub position_size: f64,
    pub max_positions: usize,
    pub use_atr_stop: bool,
    pub atr_period: usize,
    pub atr_multiplier: f64,
    /// Fixed stop as a negative fraction (e.g. -0.05 = exit at -5%).
    pub stop_loss: f64,
    /// Take-profit as a positive fraction (e.g. 0.10 = exit at +10%).
    pub take_profit: f64,
    pub commission_rate: f64,
    pub stamp_tax_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            use_trend_filter: true,
            ma_period: 20,
            ma_type: MaType::Sma,
            position_size: 0.3,
            max_positions: 3,
            use_atr_stop: false,
            atr_period: 14,
            atr_multiplier: 2.0,
            stop_loss: -0.05,
            take_profit: 0.10,
            commission_rate: 0.0003,
            stamp_tax_rate: 0.001,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("initial_capital must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("{name} must be >= 1, got 0")]
    ZeroPeriod { name: &'static str },
    #[error("position_size must be in (0, 1], got {0}")]
    PositionSizeOutOfRange(f64),
    #[error("max_positions must be >= 1")]
    ZeroMaxPositions,
    #[error("atr_multiplier must be positive, got {0}")]
    NonPositiveAtrMultiplier(f64),
    #[error("stop_loss must be a negative fraction, got {0}")]
    StopLossNotNegative(f64),
    #[error("take_profit must be a positive fraction, got {0}")]
    TakeProfitNotPositive(f64),
    #[error("{name} must not be negative, got {rate}")]
    NegativeRate { name: &'static str, rate: f64 },
}

impl BacktestConfig {
    /// Check the config for meaningless values.
    ///
    /// Inert fields are not flagged: a `ma_type` with the trend filter off is
    /// legal, it just does nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        for (name, period) in [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("ma_period", self.ma_period),
            ("atr_period", self.atr_period),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        if !(self.position_size > 0.0 && self.position_size <= 1.0) {
            return Err(ConfigError::PositionSizeOutOfRange(self.position_size));
        }
        if self.max_positions == 0 {
            return Err(ConfigError::ZeroMaxPositions);
        }
        if self.use_atr_stop && self.atr_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveAtrMultiplier(self.atr_multiplier));
        }
        if self.stop_loss >= 0.0 {
            return Err(ConfigError::StopLossNotNegative(self.stop_loss));
        }
        if self.take_profit <= 0.0 {
            return Err(ConfigError::TakeProfitNotPositive(self.take_profit));
        }
        for (name, rate) in [
            ("commission_rate", self.commission_rate),
            ("stamp_tax_rate", self.stamp_tax_rate),
        ] {
            if rate < 0.0 {
                return Err(ConfigError::NegativeRate { name, rate });
            }
        }
        Ok(())
    }
}
