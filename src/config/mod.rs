//! Engine configuration

use std::collections::HashSet;
use std::str::FromStr;

use dotenv::dotenv;

use crate::data::normalize_symbol;

/// Runtime configuration for the analytics engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Symbols eligible for open-interest enrichment, normalized. An
    /// empty set keeps every symbol eligible.
    pub default_coins: HashSet<String>,
    /// Candles requested per timeframe.
    pub kline_limit: usize,
    /// Freshness window of the open-interest cache, in seconds.
    pub oi_cache_ttl_secs: u64,
    /// Timeout applied to every upstream HTTP call, in seconds.
    pub http_timeout_secs: u64,
}

impl EngineConfig {
    /// Read configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        dotenv().ok();

        let default_coins = std::env::var("DEFAULT_COINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|coin| !coin.is_empty())
            .map(normalize_symbol)
            .collect();

        Self {
            default_coins,
            kline_limit: env_or("KLINE_LIMIT", 150),
            oi_cache_ttl_secs: env_or("OI_CACHE_TTL_SECS", 30),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", 30),
        }
    }

    /// Whether a normalized symbol gets open-interest requests at all.
    pub fn is_allowed(&self, symbol: &str) -> bool {
        self.default_coins.is_empty() || self.default_coins.contains(symbol)
    }

    /// Replace the allow-set; inputs are normalized.
    pub fn with_default_coins<I, S>(mut self, coins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_coins = coins
            .into_iter()
            .map(|coin| normalize_symbol(coin.as_ref()))
            .collect();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_coins: HashSet::new(),
            kline_limit: 150,
            oi_cache_ttl_secs: 30,
            http_timeout_secs: 30,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
