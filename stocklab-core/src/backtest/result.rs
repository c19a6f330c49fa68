//! BacktestResult — the aggregate produced at the end of a run.

use serde::{Deserialize, Serialize};

use super::stats;
use crate::domain::{EquityPoint, TradeRecord};

/// Complete output of a backtest run.
///
/// Built atomically once the bar loop and force-close have finished — a
/// result is never observable half-constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub volatility: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub avg_profit: f64,
    pub avg_loss: f64,
    pub profit_factor: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<TradeRecord>,
}

impl BacktestResult {
    /// Assemble a result from the simulator's final state.
    ///
    /// `equity_raw` is the unrounded per-bar equity series used for the
    /// return/risk statistics; `equity_curve` is its rounded presentation.
    pub fn assemble(
        initial_capital: f64,
        final_capital: f64,
        equity_raw: &[f64],
        equity_curve: Vec<EquityPoint>,
        trades: Vec<TradeRecord>,
    ) -> Self {
        let total_return = stats::total_return(initial_capital, final_capital);
        let winning_trades = trades.iter().filter(|t| t.is_winner()).count();
        let losing_trades = trades.iter().filter(|t| t.is_loser()).count();

        Self {
            initial_capital,
            final_capital,
            total_return,
            annualized_return: stats::annualized_return(total_return, equity_raw.len()),
            max_drawdown: stats::max_drawdown(equity_raw),
            sharpe_ratio: stats::sharpe_ratio(equity_raw, stats::RISK_FREE_RATE),
            volatility: stats::volatility(equity_raw),
            total_trades: trades.len(),
            winning_trades,
            losing_trades,
            win_rate: stats::win_rate(&trades),
            avg_profit: stats::avg_profit(&trades),
            avg_loss: stats::avg_loss(&trades),
            profit_factor: stats::profit_factor(&trades),
            equity_curve,
            trades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_all_neutral() {
        let result = BacktestResult::assemble(100_000.0, 100_000.0, &[], Vec::new(), Vec::new());
        assert_eq!(result.total_return, 0.0);
        assert_eq!(result.total_trades, 0);
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.sharpe_ratio, 0.0);
        assert_eq!(result.max_drawdown, 0.0);
        assert!(result.profit_factor == 0.0);
    }

    #[test]
    fn all_fields_finite_and_serializable() {
        let equity_raw = vec![100_000.0, 100_500.0, 99_800.0, 101_200.0];
        let result =
            BacktestResult::assemble(100_000.0, 101_200.0, &equity_raw, Vec::new(), Vec::new());
        for v in [
            result.total_return,
            result.annualized_return,
            result.max_drawdown,
            result.sharpe_ratio,
            result.volatility,
            result.win_rate,
            result.avg_profit,
            result.avg_loss,
            result.profit_factor,
        ] {
            assert!(v.is_finite());
        }
        let json = serde_json::to_string(&result).unwrap();
        let deser: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.final_capital, 101_200.0);
    }
}
