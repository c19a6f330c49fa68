//! Domain types: bars, signals, trades, equity snapshots.

pub mod bar;
pub mod equity;
pub mod signal;
pub mod trade;

pub use bar::PriceBar;
pub use equity::{round2, EquityPoint};
pub use signal::{PairedSignal, Pairing, ResonanceTag, ResonantSignal, Signal, SignalKind};
pub use trade::{ExitReason, TradeRecord};
