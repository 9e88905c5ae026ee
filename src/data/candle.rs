//! OHLCV candle data structures

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV candle for a single interval.
///
/// Candles are immutable once retrieved and always ordered oldest to
/// newest; the index position inside a slice carries meaning (recency
/// weighting in the level detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval open time, milliseconds since epoch
    pub open_time: i64,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
    /// Interval close time, milliseconds since epoch
    pub close_time: i64,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        close_time: i64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
        }
    }

    /// Open time as a UTC timestamp, if the epoch value is representable
    pub fn open_time_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.open_time).single()
    }

    /// Total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
