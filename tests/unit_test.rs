//! Unit tests for marketscope-rs modules

#[cfg(test)]
mod tests {
    use marketscope_rs::data::{normalize_symbol, Candle, OpenInterest, Timeframe};
    use marketscope_rs::indicators::{atr, ema, macd, rsi};
    use marketscope_rs::levels::{summarize, MAX_LEVELS};

    /// Helper to build candles from closes alone.
    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Candle::new(
                    i as i64 * 60_000,
                    close,
                    close + 0.5,
                    close - 0.5,
                    close,
                    1000.0,
                    (i as i64 + 1) * 60_000 - 1,
                )
            })
            .collect()
    }

    #[test]
    fn test_candle_utilities() {
        let candle = Candle::new(1_700_000_000_000, 100.0, 110.0, 95.0, 105.0, 1000.0, 1_700_000_179_999);

        assert_eq!(candle.range(), 15.0);
        assert!(candle.is_bullish());
        assert!(!candle.is_bearish());
        assert!(candle.open_time_utc().is_some());
    }

    #[test]
    fn test_constant_price_ema_equals_price() {
        for period in [5usize, 20, 50] {
            let candles = candles_from_closes(&vec![1234.5; 60]);
            assert!((ema(&candles, period) - 1234.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_monotonic_rise_pins_rsi_at_100() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let candles = candles_from_closes(&closes);
        assert_eq!(rsi(&candles, 7), 100.0);
        assert_eq!(rsi(&candles, 14), 100.0);
    }

    #[test]
    fn test_insufficient_history_returns_zero() {
        let candles = candles_from_closes(&[100.0, 101.0, 102.0, 101.5]);

        assert_eq!(ema(&candles, 20), 0.0);
        assert_eq!(macd(&candles), 0.0);
        assert_eq!(rsi(&candles, 7), 0.0);
        assert_eq!(atr(&candles, 14), 0.0);
    }

    #[test]
    fn test_short_four_hour_history_degenerates() {
        // ten 4h candles: EMA(20) and MACD have no history to work with
        let closes = [100.0, 102.0, 101.0, 99.0, 98.0, 97.0, 99.0, 103.0, 105.0, 104.0];
        let candles = candles_from_closes(&closes);

        assert_eq!(ema(&candles, 20), 0.0);
        assert_eq!(macd(&candles), 0.0);
        let rsi7 = rsi(&candles, 7);
        assert!(rsi7 > 0.0 && rsi7 <= 100.0);
    }

    #[test]
    fn test_open_interest_average_approximation() {
        let oi = OpenInterest::from_latest(1000.0);
        assert_eq!(oi.latest, 1000.0);
        assert!((oi.average - 999.0).abs() < 1e-9);
        assert_eq!(OpenInterest::ZERO.latest, 0.0);
    }

    #[test]
    fn test_symbol_normalization() {
        assert_eq!(normalize_symbol("sol"), "SOLUSDT");
        assert_eq!(normalize_symbol("SOLUSDT"), "SOLUSDT");
    }

    /// A single unambiguous dip touched twice more inside the window must
    /// come out as one support with strength 3 and the exact percent
    /// distance from the current price.
    #[test]
    fn test_single_support_with_three_touches() {
        let mut candles: Vec<Candle> = (0..120)
            .map(|i| {
                let low = 51_000.0 + i as f64 * 10.0;
                Candle::new(
                    i as i64 * 180_000,
                    low + 20.0,
                    low + 40.0,
                    low,
                    low + 20.0,
                    500.0,
                    (i as i64 + 1) * 180_000 - 1,
                )
            })
            .collect();

        // the level itself, then two touches inside the ±0.2% band; the
        // touch bars sit past the neighbor window so they are never
        // extremum candidates themselves
        candles[10].low = 50_000.0;
        candles[117].low = 50_040.0;
        candles[118].low = 50_060.0;

        let current_price = candles[119].close;
        let summary = summarize(&[(Timeframe::M3, candles.as_slice())], current_price);

        let levels = summary
            .timeframes
            .get(&Timeframe::M3)
            .expect("timeframe should carry levels");
        assert_eq!(levels.supports.len(), 1);

        let support = &levels.supports[0];
        assert_eq!(support.price, 50_000.0);
        assert_eq!(support.strength, 3);
        assert!(support.is_support);

        let expected_distance = (current_price - 50_000.0) / current_price * 100.0;
        assert!((support.distance - expected_distance).abs() < 1e-9);

        // rising highs leave nothing above the final close
        assert!(levels.resistances.is_empty());

        // a single timeframe has nothing to corroborate against
        assert!(summary.confluence.is_none());
    }

    #[test]
    fn test_level_sides_and_caps_on_oscillating_data() {
        // a long oscillation gives extrema on both sides of the close
        let closes: Vec<f64> = (0..150)
            .map(|i| 30_000.0 + 300.0 * (i as f64 * 0.35).sin())
            .collect();
        let candles = candles_from_closes(&closes);
        let current_price = candles[149].close;

        let summary = summarize(&[(Timeframe::H1, candles.as_slice())], current_price);
        let levels = summary
            .timeframes
            .get(&Timeframe::H1)
            .expect("timeframe should carry levels");

        assert!(levels.supports.len() <= MAX_LEVELS);
        assert!(levels.resistances.len() <= MAX_LEVELS);
        assert!(!levels.supports.is_empty() || !levels.resistances.is_empty());

        for support in &levels.supports {
            assert!(support.price < current_price);
            assert!(support.distance >= 0.0);
        }
        for resistance in &levels.resistances {
            assert!(resistance.price > current_price);
            assert!(resistance.distance >= 0.0);
        }

        // presentation order is ascending distance
        assert!(levels
            .supports
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
        assert!(levels
            .resistances
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));
    }

    #[test]
    fn test_empty_candles_produce_empty_summary() {
        let summary = summarize(&[(Timeframe::M3, &[] as &[Candle])], 100.0);
        assert!(summary.timeframes.is_empty());
        assert!(summary.confluence.is_none());
    }
}
