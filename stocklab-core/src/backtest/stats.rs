//! Post-run statistics — pure functions over the equity curve and trade list.
//!
//! Every function is total: degenerate inputs (empty curves, zero variance,
//! no losing trades) resolve to well-defined constants, never NaN or a
//! division by zero.

use crate::domain::TradeRecord;

/// Annual risk-free rate used in the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.03;

/// Trading days per year for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Cap applied to `profit_factor` when there are no losing trades.
pub const PROFIT_FACTOR_CAP: f64 = 100.0;

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(initial_capital: f64, final_capital: f64) -> f64 {
    if initial_capital <= 0.0 {
        return 0.0;
    }
    (final_capital - initial_capital) / initial_capital
}

/// Simple annualization: total return scaled by 252 / trading_days.
pub fn annualized_return(total_return: f64, trading_days: usize) -> f64 {
    if trading_days == 0 {
        return 0.0;
    }
    total_return * (TRADING_DAYS_PER_YEAR / trading_days as f64)
}

/// Maximum drawdown as a negative fraction (e.g. -0.15 = 15% decline).
///
/// Returns 0.0 for constant or monotonically rising curves.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_curve[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity_curve {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from per-bar returns.
///
/// Sharpe = (mean(r) - rf/252) / std(r) * sqrt(252). 0.0 when the standard
/// deviation is zero or the curve is shorter than 3 bars.
pub fn sharpe_ratio(equity_curve: &[f64], risk_free_rate: f64) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    let daily_rf = risk_free_rate / TRADING_DAYS_PER_YEAR;
    let mean = mean_f64(&returns) - daily_rf;
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized volatility: std of per-bar returns * sqrt(252).
pub fn volatility(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    std_dev(&returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Win rate: fraction of closed trades with positive profit.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

/// Profit factor: gross profits / |gross losses|.
///
/// With no losing trades the ratio is undefined; we report a finite sentinel
/// (`PROFIT_FACTOR_CAP` if there were profits, else 0.0) so the value stays
/// JSON-representable.
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades.iter().filter_map(|t| t.profit).filter(|p| *p > 0.0).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter_map(|t| t.profit)
        .filter(|p| *p < 0.0)
        .map(f64::abs)
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 { PROFIT_FACTOR_CAP } else { 0.0 };
    }
    (gross_profit / gross_loss).min(PROFIT_FACTOR_CAP)
}

/// Mean profit of winning trades (0.0 with no winners).
pub fn avg_profit(trades: &[TradeRecord]) -> f64 {
    let profits: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.profit)
        .filter(|p| *p > 0.0)
        .collect();
    mean_f64(&profits)
}

/// Mean profit of losing trades — a negative number (0.0 with no losers).
pub fn avg_loss(trades: &[TradeRecord]) -> f64 {
    let losses: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.profit)
        .filter(|p| *p < 0.0)
        .collect();
    mean_f64(&losses)
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Per-bar returns from an equity curve.
pub fn daily_returns(equity_curve: &[f64]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::ExitReason;

    fn make_trade(profit: f64) -> TradeRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        TradeRecord {
            trade_id: 1,
            entry_date: date,
            entry_time: None,
            entry_price: 100.0,
            exit_date: Some(date),
            exit_time: None,
            exit_price: Some(100.0 + profit / 50.0),
            shares: 50,
            profit: Some(profit),
            profit_percent: Some(profit / 5000.0),
            exit_reason: Some(ExitReason::Signal),
            stop_loss_price: 95.0,
        }
    }

    // ── Total / annualized return ──

    #[test]
    fn total_return_positive() {
        assert!((total_return(100_000.0, 110_000.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_negative() {
        assert!((total_return(100_000.0, 90_000.0) + 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_zero_capital() {
        assert_eq!(total_return(0.0, 50_000.0), 0.0);
    }

    #[test]
    fn annualized_return_full_year_is_identity() {
        assert!((annualized_return(0.1, 252) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn annualized_return_half_year_doubles() {
        assert!((annualized_return(0.1, 126) - 0.2).abs() < 1e-10);
    }

    #[test]
    fn annualized_return_no_days() {
        assert_eq!(annualized_return(0.1, 0), 0.0);
    }

    // ── Max drawdown ──

    #[test]
    fn max_drawdown_known() {
        let eq = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (90_000.0 - 110_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_increase() {
        let eq: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&eq), 0.0);
    }

    #[test]
    fn max_drawdown_empty() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    // ── Sharpe / volatility ──

    #[test]
    fn sharpe_constant_equity_is_zero() {
        let eq = vec![100_000.0; 100];
        assert_eq!(sharpe_ratio(&eq, 0.0), 0.0);
    }

    #[test]
    fn sharpe_positive_for_steady_gains() {
        let mut eq = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            eq.push(eq[i - 1] * r);
        }
        let s = sharpe_ratio(&eq, 0.0);
        assert!(s > 5.0, "Sharpe should be high for consistent gains, got {s}");
    }

    #[test]
    fn sharpe_constant_return_is_zero() {
        // Zero variance → Sharpe defined as 0.
        let mut eq = vec![100_000.0];
        for i in 1..100 {
            eq.push(eq[i - 1] * 1.001);
        }
        assert_eq!(sharpe_ratio(&eq, 0.0), 0.0);
    }

    #[test]
    fn volatility_scales_with_noise() {
        let calm: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64).collect();
        let mut wild = vec![100_000.0];
        for i in 1..100 {
            let r = if i % 2 == 0 { 1.03 } else { 0.97 };
            wild.push(wild[i - 1] * r);
        }
        assert!(volatility(&wild) > volatility(&calm));
    }

    // ── Trade stats ──

    #[test]
    fn win_rate_mixed() {
        let trades = vec![
            make_trade(500.0),
            make_trade(-200.0),
            make_trade(300.0),
            make_trade(-100.0),
        ];
        assert!((win_rate(&trades) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    #[test]
    fn profit_factor_mixed() {
        let trades = vec![make_trade(500.0), make_trade(-200.0), make_trade(300.0)];
        assert!((profit_factor(&trades) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn profit_factor_all_winners_capped() {
        let trades = vec![make_trade(500.0), make_trade(300.0)];
        assert_eq!(profit_factor(&trades), PROFIT_FACTOR_CAP);
    }

    #[test]
    fn profit_factor_all_losers() {
        let trades = vec![make_trade(-500.0), make_trade(-300.0)];
        assert_eq!(profit_factor(&trades), 0.0);
    }

    #[test]
    fn avg_profit_and_loss() {
        let trades = vec![make_trade(500.0), make_trade(-200.0), make_trade(300.0)];
        assert!((avg_profit(&trades) - 400.0).abs() < 1e-10);
        assert!((avg_loss(&trades) + 200.0).abs() < 1e-10);
    }

    #[test]
    fn open_trades_do_not_count() {
        let mut open = make_trade(0.0);
        open.profit = None;
        open.exit_price = None;
        let trades = vec![make_trade(500.0), open];
        // The open trade has no profit: only the winner contributes.
        assert!((avg_profit(&trades) - 500.0).abs() < 1e-10);
        assert_eq!(avg_loss(&trades), 0.0);
    }

    // ── Daily returns ──

    #[test]
    fn daily_returns_basic() {
        let eq = vec![100.0, 110.0, 105.0];
        let r = daily_returns(&eq);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-10);
        assert!((r[1] - (105.0 - 110.0) / 110.0).abs() < 1e-10);
    }
}
