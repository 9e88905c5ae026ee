//! Marketscope: market analytics engine for an automated crypto-futures
//! trading assistant.
//!
//! The engine turns raw candle histories into one immutable
//! [`snapshot::MarketSnapshot`] (trend indicators, rolling indicator
//! series, multi-timeframe support/resistance with cross-timeframe
//! confluence, and open-interest/funding context) plus a deterministic
//! text rendering for a downstream reasoning model.
//!
//! # Features
//!
//! - **Indicators**: EMA, MACD, RSI and ATR as pure functions with Wilder
//!   smoothing
//! - **Support/Resistance**: recency-weighted extremum detection, level
//!   merging and ranking, multi-timeframe confluence scoring
//! - **Open Interest**: TTL-bounded whole-market cache with a
//!   double-checked refresh under concurrent callers
//! - **Snapshot Assembly**: concurrent candle retrieval at four
//!   timeframes, enrichment with degradation policy, text rendering
//!
//! # Example
//!
//! ```no_run
//! use marketscope_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let engine = MarketEngine::from_config(EngineConfig::from_env())?;
//!     let snapshot = engine.snapshot("BTC", Exchange::BinanceFutures).await?;
//!     println!("{}", render(&snapshot));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod exchange;
pub mod indicators;
pub mod levels;
pub mod series;
pub mod snapshot;

// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::OpenInterestCache;
    pub use crate::config::EngineConfig;
    pub use crate::data::{normalize_symbol, Candle, OpenInterest, Timeframe};
    pub use crate::error::SnapshotError;
    pub use crate::exchange::{
        BinanceFuturesClient, BulkOpenInterestSource, HyperliquidClient, MarketDataSource,
    };
    pub use crate::indicators::{atr, ema, macd, rsi};
    pub use crate::levels::{PriceLevel, SupportResistanceSummary, TimeframeLevels};
    pub use crate::series::{IntradaySeries, LongerTermContext};
    pub use crate::snapshot::{render, Exchange, MarketEngine, MarketSnapshot};

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
