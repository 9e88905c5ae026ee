//! RSI (Relative Strength Index) indicator

use crate::data::Candle;

/// Relative strength index over the closes of `candles`.
///
/// Average gain and loss are initialized from the first `period` deltas,
/// then Wilder-smoothed (`avg = (avg * (period - 1) ± delta) / period`)
/// over the remainder. Returns exactly 100.0 when the average loss is
/// zero, and 0.0 when the input is no longer than `period`.
pub fn rsi(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() <= period {
        return 0.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            gains += change;
        } else {
            losses += -change;
        }
    }

    let n = period as f64;
    let mut avg_gain = gains / n;
    let mut avg_loss = losses / n;

    for i in (period + 1)..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            avg_gain = (avg_gain * (n - 1.0) + change) / n;
            avg_loss = (avg_loss * (n - 1.0)) / n;
        } else {
            avg_gain = (avg_gain * (n - 1.0)) / n;
            avg_loss = (avg_loss * (n - 1.0) - change) / n;
        }
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
