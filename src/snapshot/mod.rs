//! Market snapshot assembly
//!
//! The assembler fetches candle histories at four timeframes, derives
//! current indicator values, rolling series and the support/resistance
//! summary, and enriches the result with open interest and funding rate.
//! Kline failures are fatal; enrichment failures degrade to zero
//! placeholders. Callers either get a complete snapshot or one
//! explanatory error, never a partially populated snapshot.

pub mod render;

pub use render::render;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::OpenInterestCache;
use crate::config::EngineConfig;
use crate::data::{normalize_symbol, Candle, OpenInterest, Timeframe};
use crate::error::SnapshotError;
use crate::exchange::{
    BinanceFuturesClient, BulkOpenInterestSource, HyperliquidClient, MarketDataSource,
};
use crate::indicators::{ema, macd, rsi};
use crate::levels::{summarize, SupportResistanceSummary};
use crate::series::{IntradaySeries, LongerTermContext};

/// 3m candles spanning one hour, for the 1h price delta.
const BARS_PER_HOUR_INTRADAY: usize = 20;

/// Which venue serves the open-interest enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    BinanceFutures,
    Hyperliquid,
}

/// Complete market view for one symbol as of the time of the call.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub current_price: f64,
    /// Percent change versus one hour ago (20 intraday candles back).
    pub price_change_1h: f64,
    /// Percent change versus the previous 4-hour candle.
    pub price_change_4h: f64,
    pub current_ema20: f64,
    pub current_macd: f64,
    pub current_rsi7: f64,
    pub open_interest: OpenInterest,
    pub funding_rate: f64,
    pub intraday: IntradaySeries,
    pub longer_term: LongerTermContext,
    pub support_resistance: SupportResistanceSummary,
}

/// Orchestrates data sources, cache and analytics into snapshots.
pub struct MarketEngine {
    source: Arc<dyn MarketDataSource>,
    oi_cache: OpenInterestCache,
    config: EngineConfig,
}

impl MarketEngine {
    /// Wire up the production clients from `config`.
    pub fn from_config(config: EngineConfig) -> crate::Result<Self> {
        let source = Arc::new(BinanceFuturesClient::new(config.http_timeout_secs)?);
        let bulk = Arc::new(HyperliquidClient::new(config.http_timeout_secs)?);
        Ok(Self::new(source, bulk, config))
    }

    /// Build an engine from explicit sources (tests inject mocks here).
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        bulk: Arc<dyn BulkOpenInterestSource>,
        config: EngineConfig,
    ) -> Self {
        let oi_cache =
            OpenInterestCache::with_ttl(bulk, Duration::from_secs(config.oi_cache_ttl_secs));
        Self {
            source,
            oi_cache,
            config,
        }
    }

    /// Assemble a snapshot for `symbol`.
    ///
    /// The symbol is normalized to an upper-case USDT pair first.
    /// `exchange` selects where open interest comes from.
    pub async fn snapshot(
        &self,
        symbol: &str,
        exchange: Exchange,
    ) -> Result<MarketSnapshot, SnapshotError> {
        let symbol = normalize_symbol(symbol);
        let limit = self.config.kline_limit;

        let (klines_3m, klines_15m, klines_1h, klines_4h) = tokio::try_join!(
            self.fetch_klines(&symbol, Timeframe::M3, limit),
            self.fetch_klines(&symbol, Timeframe::M15, limit),
            self.fetch_klines(&symbol, Timeframe::H1, limit),
            self.fetch_klines(&symbol, Timeframe::H4, limit),
        )?;

        let Some(last) = klines_3m.last() else {
            return Err(SnapshotError::EmptyHistory {
                timeframe: Timeframe::M3,
            });
        };
        let current_price = last.close;

        let price_change_1h = price_change_over(&klines_3m, BARS_PER_HOUR_INTRADAY, current_price);
        let price_change_4h = price_change_over(&klines_4h, 1, current_price);

        let open_interest = self.fetch_open_interest(&symbol, exchange).await;

        let funding_rate = match self.source.funding_rate(&symbol).await {
            Ok(rate) => rate,
            Err(error) => {
                warn!(%symbol, %error, "funding rate fetch failed, defaulting to zero");
                0.0
            }
        };

        let support_resistance = summarize(
            &[
                (Timeframe::M3, klines_3m.as_slice()),
                (Timeframe::M15, klines_15m.as_slice()),
                (Timeframe::H1, klines_1h.as_slice()),
                (Timeframe::H4, klines_4h.as_slice()),
            ],
            current_price,
        );

        let snapshot = MarketSnapshot {
            current_price,
            price_change_1h,
            price_change_4h,
            current_ema20: ema(&klines_3m, 20),
            current_macd: macd(&klines_3m),
            current_rsi7: rsi(&klines_3m, 7),
            open_interest,
            funding_rate,
            intraday: IntradaySeries::from_candles(&klines_3m),
            longer_term: LongerTermContext::from_candles(&klines_4h),
            support_resistance,
            symbol,
        };
        info!(symbol = %snapshot.symbol, price = snapshot.current_price, "assembled market snapshot");

        Ok(snapshot)
    }

    async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, SnapshotError> {
        self.source
            .klines(symbol, timeframe, limit)
            .await
            .map_err(|reason| SnapshotError::KlineFetch { timeframe, reason })
    }

    /// Open interest is an enrichment: excluded symbols skip the network
    /// call entirely, and failures degrade to the zero placeholder.
    async fn fetch_open_interest(&self, symbol: &str, exchange: Exchange) -> OpenInterest {
        if !self.config.is_allowed(symbol) {
            return OpenInterest::ZERO;
        }

        let fetched = match exchange {
            Exchange::Hyperliquid => self.oi_cache.lookup(symbol).await,
            Exchange::BinanceFutures => self
                .source
                .open_interest(symbol)
                .await
                .map(OpenInterest::from_latest),
        };

        match fetched {
            Ok(open_interest) => open_interest,
            Err(error) => {
                warn!(%symbol, %error, "open interest fetch failed, using zero placeholder");
                OpenInterest::ZERO
            }
        }
    }
}

/// Percent change of `current_price` versus the close `bars_back` candles
/// before the newest one. Too little history, or a non-positive reference
/// close, reads as no change.
fn price_change_over(klines: &[Candle], bars_back: usize, current_price: f64) -> f64 {
    if klines.len() < bars_back + 1 {
        return 0.0;
    }
    let reference = klines[klines.len() - 1 - bars_back].close;
    if reference <= 0.0 {
        return 0.0;
    }
    (current_price - reference) / reference * 100.0
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
    fn price_change_needs_enough_bars() {
        let klines = candles(&[100.0; 20]);
        assert_eq!(price_change_over(&klines, 20, 100.0), 0.0);

        let klines = candles(&[100.0; 21]);
        assert_eq!(price_change_over(&klines, 20, 110.0), 10.0);
    }

    #[test]
    fn price_change_uses_previous_bar() {
        let klines = candles(&[100.0, 50.0, 80.0]);
        // reference is one bar before the newest
        assert_eq!(price_change_over(&klines, 1, 75.0), 50.0);
    }

    #[test]
    fn non_positive_reference_reads_as_no_change() {
        let klines = candles(&[0.0, 50.0]);
        assert_eq!(price_change_over(&klines, 1, 50.0), 0.0);
    }
}
