//! Bar-by-bar backtest simulator.
//!
//! One pass in strict chronological order. Per bar:
//! 1. Exit checks over open positions (iterated in reverse so removal is
//!    safe): ATR stop or fixed percentage stop, then take-profit, then the
//!    RSI-overbought signal exit.
//! 2. Entry check: RSI below the oversold threshold, optional trend filter,
//!    cash-fraction position sizing.
//! 3. Equity snapshot: equity == cash + position value.
//!
//! After the loop every remaining position is force-closed at the final
//! bar's close with exit reason `open`, applying the same cost model.
//!
//! Position state carries forward bar to bar, so the loop itself cannot be
//! parallelized; independent runs (other symbols, other configs) can.

use tracing::{debug, info};

use super::config::{BacktestConfig, MaType};
use super::result::BacktestResult;
use crate::domain::{round2, EquityPoint, ExitReason, PriceBar, TradeRecord};
use crate::indicators::{atr, closes, ema, rsi, sma};

/// Simulator-internal state for one open position. Destroyed on close.
struct OpenPosition {
    trade_index: usize,
    entry_price: f64,
    shares: u64,
    /// Stop price frozen at entry (ATR-scaled if enabled, else percentage).
    stop_loss_price: f64,
}

/// Run a backtest over a bar series.
///
/// Degrades rather than fails: a series too short for the configured
/// warm-ups simply never triggers an entry, producing a flat equity curve
/// and an empty trade ledger.
pub fn run_backtest(bars: &[PriceBar], config: &BacktestConfig) -> BacktestResult {
    let close_series = closes(bars);
    let rsi_series = rsi(&close_series, config.rsi_period);
    let ma_series = match config.ma_type {
        MaType::Sma => sma(&close_series, config.ma_period),
        MaType::Ema => ema(&close_series, config.ma_period),
    };
    let atr_series = atr(bars, config.atr_period);

    let mut cash = config.initial_capital;
    let mut positions: Vec<OpenPosition> = Vec::new();
    let mut trades: Vec<TradeRecord> = Vec::new();
    let mut equity_raw: Vec<f64> = Vec::with_capacity(bars.len());
    let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
    let mut next_trade_id: u64 = 1;

    for (i, bar) in bars.iter().enumerate() {
        let close = bar.close;

        // 1. Exit checks, newest-first so removal keeps earlier indices valid.
        for p in (0..positions.len()).rev() {
            if let Some(reason) = exit_trigger(&positions[p], close, rsi_series[i], config) {
                let position = positions.remove(p);
                cash += close_position(
                    &mut trades[position.trade_index],
                    &position,
                    bar,
                    close,
                    reason,
                    config,
                );
                debug!(bar = i, price = close, ?reason, "position closed");
            }
        }

        // 2. Entry check (at most one new position per bar).
        if positions.len() < config.max_positions {
            if let Some(r) = rsi_series[i] {
                let trend_ok =
                    !config.use_trend_filter || ma_series[i].is_some_and(|m| close > m);
                if r < config.rsi_oversold && trend_ok {
                    let shares = (cash * config.position_size / close).floor();
                    if shares >= 1.0 {
                        let shares = shares as u64;
                        let stop_loss_price = initial_stop(close, atr_series[i], config);
                        cash -= close * shares as f64 * (1.0 + config.commission_rate);
                        trades.push(TradeRecord {
                            trade_id: next_trade_id,
                            entry_date: bar.date,
                            entry_time: bar.time,
                            entry_price: close,
                            exit_date: None,
                            exit_time: None,
                            exit_price: None,
                            shares,
                            profit: None,
                            profit_percent: None,
                            exit_reason: None,
                            stop_loss_price: round2(stop_loss_price),
                        });
                        next_trade_id += 1;
                        positions.push(OpenPosition {
                            trade_index: trades.len() - 1,
                            entry_price: close,
                            shares,
                            stop_loss_price,
                        });
                        debug!(bar = i, price = close, shares, "position opened");
                    }
                }
            }
        }

        // 3. Equity snapshot.
        let position_value: f64 = positions.iter().map(|p| p.shares as f64 * close).sum();
        equity_raw.push(cash + position_value);
        equity_curve.push(EquityPoint::new(bar.date, bar.time, cash, position_value));
    }

    // Force-close whatever is still open at the final bar's close.
    if let Some(last) = bars.last() {
        while let Some(position) = positions.pop() {
            cash += close_position(
                &mut trades[position.trade_index],
                &position,
                last,
                last.close,
                ExitReason::Open,
                config,
            );
        }
    }

    info!(
        bars = bars.len(),
        trades = trades.len(),
        final_capital = cash,
        "backtest complete"
    );

    BacktestResult::assemble(config.initial_capital, cash, &equity_raw, equity_curve, trades)
}

/// Evaluate exit triggers for one position, in precedence order.
///
/// The ATR stop compares against the stop price frozen at entry; the fixed
/// percentage stop is only consulted when the ATR stop is disabled.
fn exit_trigger(
    position: &OpenPosition,
    close: f64,
    rsi_now: Option<f64>,
    config: &BacktestConfig,
) -> Option<ExitReason> {
    let profit_pct = (close - position.entry_price) / position.entry_price;

    if config.use_atr_stop {
        if close <= position.stop_loss_price {
            return Some(ExitReason::AtrStop);
        }
    } else if profit_pct <= config.stop_loss {
        return Some(ExitReason::StopLoss);
    }

    if profit_pct >= config.take_profit {
        return Some(ExitReason::TakeProfit);
    }

    if rsi_now.is_some_and(|r| r >= config.rsi_overbought) {
        return Some(ExitReason::Signal);
    }

    None
}

/// Stop price for a fresh position.
///
/// ATR-scaled when the ATR stop is enabled and ATR has warmed up; the fixed
/// percentage stop seeds it otherwise.
fn initial_stop(close: f64, atr_now: Option<f64>, config: &BacktestConfig) -> f64 {
    if config.use_atr_stop {
        if let Some(a) = atr_now {
            return close - a * config.atr_multiplier;
        }
    }
    close * (1.0 + config.stop_loss)
}

/// Close a position at `price`, completing its trade record.
///
/// Net profit charges both sides: buy commission, sell commission, and
/// sell-side stamp tax. Returns the cash credited (sale proceeds minus
/// sell-side costs; the buy-side commission was debited at entry).
fn close_position(
    trade: &mut TradeRecord,
    position: &OpenPosition,
    bar: &PriceBar,
    price: f64,
    reason: ExitReason,
    config: &BacktestConfig,
) -> f64 {
    let shares = position.shares as f64;
    let gross = (price - position.entry_price) * shares;
    let buy_commission = position.entry_price * shares * config.commission_rate;
    let sell_commission = price * shares * config.commission_rate;
    let stamp_tax = price * shares * config.stamp_tax_rate;
    let net = gross - buy_commission - sell_commission - stamp_tax;

    trade.exit_date = Some(bar.date);
    trade.exit_time = bar.time;
    trade.exit_price = Some(round2(price));
    trade.profit = Some(round2(net));
    trade.profit_percent = Some((price - position.entry_price) / position.entry_price);
    trade.exit_reason = Some(reason);

    price * shares - sell_commission - stamp_tax
}
