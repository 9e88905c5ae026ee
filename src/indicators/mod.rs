//! Technical indicators module
//!
//! Pure functions over an ordered (oldest to newest) candle slice; no
//! hidden state. Each call re-derives the indicator from scratch, so
//! callers that want a rolling series recompute per prefix (see
//! [`crate::series`]). That is O(n²) per series, which is acceptable at
//! the window sizes used here (at most 150 candles).
//!
//! Insufficient history returns a defined zero rather than an error:
//! "not enough data yet" is a normal transient state for a live window.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use atr::*;
pub use ema::*;
pub use macd::*;
pub use rsi::*;
