//! Candle interval timeframes

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of timeframes the engine works with.
///
/// The snapshot assembler fetches the four shortest; the
/// support/resistance summary and its confluence weighting reserve slots
/// for all six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M3,
    M15,
    H1,
    H4,
    H12,
    D1,
}

impl Timeframe {
    /// All timeframes, shortest first.
    pub const ALL: [Timeframe; 6] = [
        Timeframe::M3,
        Timeframe::M15,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::H12,
        Timeframe::D1,
    ];

    /// Exchange interval string for kline requests.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::M3 => "3m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1d",
        }
    }

    /// Parse an exchange interval string.
    pub fn from_interval(s: &str) -> Option<Self> {
        match s {
            "3m" => Some(Timeframe::M3),
            "15m" => Some(Timeframe::M15),
            "1h" => Some(Timeframe::H1),
            "4h" => Some(Timeframe::H4),
            "12h" => Some(Timeframe::H12),
            "1d" => Some(Timeframe::D1),
            _ => None,
        }
    }

    /// Weight of this timeframe's levels when corroborating a confluence
    /// candidate. Longer timeframes count for more.
    pub fn confluence_weight(&self) -> f64 {
        match self {
            Timeframe::M3 => 0.8,
            Timeframe::M15 => 1.0,
            Timeframe::H1 => 1.2,
            Timeframe::H4 => 1.4,
            Timeframe::H12 => 1.6,
            Timeframe::D1 => 1.8,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interval())
    }
}
