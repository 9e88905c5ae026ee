//! MACD (Moving Average Convergence Divergence) indicator

use crate::data::Candle;
use crate::indicators::ema;

/// Fast EMA period of the MACD line.
pub const MACD_FAST: usize = 12;
/// Slow EMA period of the MACD line.
pub const MACD_SLOW: usize = 26;

/// MACD line over `candles`: `EMA(12) - EMA(26)`, no signal-line
/// smoothing. Returns 0.0 when fewer than 26 candles exist.
pub fn macd(candles: &[Candle]) -> f64 {
    if candles.len() < MACD_SLOW {
        return 0.0;
    }

    ema(candles, MACD_FAST) - ema(candles, MACD_SLOW)
}
