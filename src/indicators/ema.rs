//! EMA (Exponential Moving Average) indicator

use crate::data::Candle;

/// Exponential moving average over the closes of `candles`.
///
/// Seeded with the simple average of the first `period` closes, then
/// recursed forward with multiplier `2 / (period + 1)`. Returns 0.0 when
/// fewer than `period` candles exist.
pub fn ema(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period {
        return 0.0;
    }

    let seed: f64 = candles[..period].iter().map(|c| c.close).sum::<f64>() / period as f64;

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = seed;
    for candle in &candles[period..] {
        ema = (candle.close - ema) * multiplier + ema;
    }

    ema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 0.0, i as i64))
            .collect()
    }

    #[test]
    fn seeds_with_simple_average() {
        let candles = candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ema(&candles, 5), 3.0);
    }

    #[test]
    fn constant_price_yields_that_price() {
        let candles = candles(&[42.0; 60]);
        assert!((ema(&candles, 20) - 42.0).abs() < 1e-12);
    }

    #[test]
    fn short_history_yields_zero() {
        let candles = candles(&[1.0, 2.0, 3.0]);
        assert_eq!(ema(&candles, 20), 0.0);
    }
}
