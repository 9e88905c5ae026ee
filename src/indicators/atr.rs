//! ATR (Average True Range) indicator

use crate::data::Candle;

/// Average true range over `candles`.
///
/// True range is `max(high - low, |high - prev_close|, |low - prev_close|)`
/// from the second candle on; the first `period` true ranges seed the
/// average, which is then Wilder-smoothed. Returns 0.0 when the input is
/// no longer than `period`.
pub fn atr(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() <= period {
        return 0.0;
    }

    let mut true_ranges = vec![0.0; candles.len()];
    for i in 1..candles.len() {
        let high = candles[i].high;
        let low = candles[i].low;
        let prev_close = candles[i - 1].close;

        true_ranges[i] = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
    }

    let n = period as f64;
    let mut atr = true_ranges[1..=period].iter().sum::<f64>() / n;

    for tr in &true_ranges[(period + 1)..] {
        atr = (atr * (n - 1.0) + tr) / n;
    }

    atr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranging_candles(count: usize, close: f64, spread: f64) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                Candle::new(
                    i as i64,
                    close,
                    close + spread,
                    close - spread,
                    close,
                    0.0,
                    i as i64,
                )
            })
            .collect()
    }

    #[test]
    fn constant_range_yields_that_range() {
        // every true range is exactly 2 * spread, so smoothing is a no-op
        let candles = ranging_candles(30, 100.0, 1.0);
        assert!((atr(&candles, 14) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn short_history_yields_zero() {
        let candles = ranging_candles(14, 100.0, 1.0);
        assert_eq!(atr(&candles, 14), 0.0);
        assert_eq!(atr(&candles, 20), 0.0);
    }

    #[test]
    fn gaps_widen_the_true_range() {
        // a gap between prev close and the next bar dominates high - low
        let mut candles = ranging_candles(10, 100.0, 1.0);
        candles[5].high = 112.0;
        candles[5].low = 110.0;
        candles[5].close = 111.0;
        let value = atr(&candles, 3);
        assert!(value > 2.0);
    }
}
