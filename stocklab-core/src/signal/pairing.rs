//! FIFO trade pairing.
//!
//! Matches each sell signal to the oldest still-open buy, assigning both a
//! shared trade id and the round-trip profit. One pass, O(n), no look-ahead,
//! no re-ordering: the output has the same length and order as the input.

use std::collections::VecDeque;

use crate::domain::{PairedSignal, Pairing, Signal, SignalKind};

/// Pair buy and sell signals into round-trip trades.
///
/// Sells with no open buy pass through unpaired; buys left open at the end
/// stay unpaired (a later run over an extended list may match them).
pub fn pair_trades(signals: &[Signal]) -> Vec<PairedSignal> {
    let mut out: Vec<PairedSignal> = signals
        .iter()
        .map(|s| PairedSignal {
            signal: s.clone(),
            pairing: None,
        })
        .collect();

    let mut open_buys: VecDeque<usize> = VecDeque::new();
    let mut next_trade_id: u64 = 1;

    for i in 0..out.len() {
        match out[i].signal.kind {
            SignalKind::Buy => open_buys.push_back(i),
            SignalKind::Sell => {
                let buy_index = match open_buys.pop_front() {
                    Some(b) => b,
                    None => continue,
                };
                let buy_price = out[buy_index].signal.price;
                let sell_price = out[i].signal.price;
                let profit_loss = sell_price - buy_price;
                let profit_loss_percent = if buy_price != 0.0 {
                    profit_loss / buy_price * 100.0
                } else {
                    0.0
                };

                out[buy_index].pairing = Some(Pairing {
                    trade_id: next_trade_id,
                    counterpart: i,
                    profit_loss,
                    profit_loss_percent,
                });
                out[i].pairing = Some(Pairing {
                    trade_id: next_trade_id,
                    counterpart: buy_index,
                    profit_loss,
                    profit_loss_percent,
                });
                next_trade_id += 1;
            }
            SignalKind::Hold => {}
        }
    }

    out
}
