//! Rolling indicator series for the snapshot's short and long timeframes.
//!
//! Every point independently re-derives its indicator over the candle
//! prefix ending at that point, so a series only starts once enough
//! history exists at that index. Vectors shorter than the window (or than
//! each other) are expected; consumers must not treat that as an error.

use crate::data::Candle;
use crate::indicators::{atr, ema, macd, rsi};

/// Number of trailing data points kept per series.
pub const SERIES_WINDOW: usize = 10;

/// Intraday (short timeframe) indicator series, oldest to newest.
#[derive(Debug, Clone, Default)]
pub struct IntradaySeries {
    pub closes: Vec<f64>,
    pub ema20: Vec<f64>,
    pub macd: Vec<f64>,
    pub rsi7: Vec<f64>,
    pub rsi14: Vec<f64>,
}

impl IntradaySeries {
    /// Build the last [`SERIES_WINDOW`] points from `candles`.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut series = Self::default();

        let start = candles.len().saturating_sub(SERIES_WINDOW);
        for i in start..candles.len() {
            let prefix = &candles[..=i];
            series.closes.push(candles[i].close);

            if i >= 19 {
                series.ema20.push(ema(prefix, 20));
            }
            if i >= 25 {
                series.macd.push(macd(prefix));
            }
            if i >= 7 {
                series.rsi7.push(rsi(prefix, 7));
            }
            if i >= 14 {
                series.rsi14.push(rsi(prefix, 14));
            }
        }

        series
    }
}

/// Longer-term (4-hour timeframe) context: scalar trend/volatility values
/// plus short MACD/RSI histories.
#[derive(Debug, Clone, Default)]
pub struct LongerTermContext {
    pub ema20: f64,
    pub ema50: f64,
    pub atr3: f64,
    pub atr14: f64,
    pub current_volume: f64,
    pub average_volume: f64,
    pub macd: Vec<f64>,
    pub rsi14: Vec<f64>,
}

impl LongerTermContext {
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut context = Self {
            ema20: ema(candles, 20),
            ema50: ema(candles, 50),
            atr3: atr(candles, 3),
            atr14: atr(candles, 14),
            ..Self::default()
        };

        if let Some(last) = candles.last() {
            context.current_volume = last.volume;
            context.average_volume =
                candles.iter().map(|c| c.volume).sum::<f64>() / candles.len() as f64;
        }

        let start = candles.len().saturating_sub(SERIES_WINDOW);
        for i in start..candles.len() {
            let prefix = &candles[..=i];
            if i >= 25 {
                context.macd.push(macd(prefix));
            }
            if i >= 14 {
                context.rsi14.push(rsi(prefix, 14));
            }
        }

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.7).sin() * 3.0;
                Candle::new(i as i64, close, close + 1.0, close - 1.0, close, 10.0 + i as f64, i as i64)
            })
            .collect()
    }

    #[test]
    fn series_start_once_history_allows() {
        // with 26 candles the window spans indices 16..=25
        let candles = candles(26);
        let series = IntradaySeries::from_candles(&candles);

        assert_eq!(series.closes.len(), 10);
        assert_eq!(series.ema20.len(), 7); // indices 19..=25
        assert_eq!(series.macd.len(), 1); // index 25 only
        assert_eq!(series.rsi7.len(), 10);
        assert_eq!(series.rsi14.len(), 10);
    }

    #[test]
    fn last_point_matches_full_slice_recompute() {
        let candles = candles(60);
        let series = IntradaySeries::from_candles(&candles);

        assert_eq!(series.ema20.last().copied(), Some(ema(&candles, 20)));
        assert_eq!(series.macd.last().copied(), Some(macd(&candles)));
        assert_eq!(series.rsi7.last().copied(), Some(rsi(&candles, 7)));
    }

    #[test]
    fn short_input_yields_short_series() {
        let candles = candles(5);
        let series = IntradaySeries::from_candles(&candles);

        assert_eq!(series.closes.len(), 5);
        assert!(series.ema20.is_empty());
        assert!(series.macd.is_empty());
        assert!(series.rsi7.is_empty());
    }

    #[test]
    fn longer_term_scalars_and_volumes() {
        let candles = candles(60);
        let context = LongerTermContext::from_candles(&candles);

        assert_eq!(context.ema20, ema(&candles, 20));
        assert_eq!(context.ema50, ema(&candles, 50));
        assert_eq!(context.atr3, atr(&candles, 3));
        assert_eq!(context.atr14, atr(&candles, 14));
        assert_eq!(context.current_volume, 69.0);
        let expected_avg = candles.iter().map(|c| c.volume).sum::<f64>() / 60.0;
        assert!((context.average_volume - expected_avg).abs() < 1e-12);
        assert_eq!(context.macd.len(), 10);
        assert_eq!(context.rsi14.len(), 10);
    }
}
