//! TradeRecord — one simulated position from entry to exit.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Why a simulated position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// ATR-scaled stop hit.
    AtrStop,
    /// Fixed percentage stop hit.
    StopLoss,
    /// Take-profit threshold reached.
    TakeProfit,
    /// Indicator-based exit (RSI overbought).
    Signal,
    /// Still open at the end of the horizon; force-closed at the last close.
    Open,
}

/// One position's ledger entry, created at entry and completed at exit.
///
/// Exit fields stay `None` while the position is open. The simulator
/// force-closes every remaining position at the final bar, so a finished
/// run contains no half-filled records. Monetary fields are rounded to
/// 2 decimals when the record is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub trade_id: u64,
    pub entry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<NaiveTime>,
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    pub shares: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
    pub stop_loss_price: f64,
}

impl TradeRecord {
    pub fn is_closed(&self) -> bool {
        self.exit_price.is_some()
    }

    pub fn is_winner(&self) -> bool {
        self.profit.is_some_and(|p| p > 0.0)
    }

    pub fn is_loser(&self) -> bool {
        self.profit.is_some_and(|p| p < 0.0)
    }
}
