//! Exchange data sources
//!
//! The engine only needs two upstream capabilities: bounded candle/state
//! retrieval per symbol, and one bulk call for the whole market's open
//! interest. Both are traits so tests can substitute deterministic
//! sources.

pub mod binance;
pub mod hyperliquid;

pub use binance::*;
pub use hyperliquid::*;

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::data::{Candle, Timeframe};
use crate::Result;

/// Candle history plus per-symbol enrichments.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the `limit` most recent candles for `(symbol, timeframe)`,
    /// ordered oldest to newest. Transport and decoding failures must be
    /// explicit errors, never silent truncation.
    async fn klines(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> Result<Vec<Candle>>;

    /// Latest open interest for one symbol.
    async fn open_interest(&self, symbol: &str) -> Result<f64>;

    /// Latest funding rate for one symbol.
    async fn funding_rate(&self, symbol: &str) -> Result<f64>;
}

/// One bulk call returning the entire market's open interest keyed by
/// normalized symbol.
#[async_trait]
pub trait BulkOpenInterestSource: Send + Sync {
    async fn open_interest_table(&self) -> Result<HashMap<String, f64>>;
}

/// Turn a non-success response into a descriptive error carrying status
/// and body.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("request failed with status {status}: {body}"))
}
