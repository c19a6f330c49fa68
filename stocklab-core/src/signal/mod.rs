//! Signal generation, pairing, levels, and multi-timeframe resonance.

pub mod generator;
pub mod levels;
pub mod pairing;
pub mod resonance;

pub use generator::{generate_signals, MIN_BARS_FOR_SIGNALS};
pub use levels::{detect_levels, PriceLevels};
pub use pairing::pair_trades;
pub use resonance::{analyze_resonance, boost_signal, ResonanceAnalysis, TimeframeSignal};
