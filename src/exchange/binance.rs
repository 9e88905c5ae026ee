//! Binance USDⓈ-M futures REST client

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::data::{Candle, Timeframe};
use crate::exchange::{ensure_success, MarketDataSource};
use crate::Result;

const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

/// REST client for the Binance futures market-data endpoints.
#[derive(Debug, Clone)]
pub struct BinanceFuturesClient {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceFuturesClient {
    /// Client against the production endpoint with the given timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs)
    }

    /// Client against a custom base URL (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl MarketDataSource for BinanceFuturesClient {
    async fn klines(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> Result<Vec<Candle>> {
        let url = format!("{}/fapi/v1/klines", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", timeframe.interval()),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("kline request for {symbol} {timeframe} failed"))?;
        let response = ensure_success(response).await?;

        let rows: Vec<Vec<Value>> = response
            .json()
            .await
            .with_context(|| format!("kline payload for {symbol} {timeframe} did not decode"))?;
        debug!(%symbol, %timeframe, rows = rows.len(), "fetched klines");

        rows.iter().map(|row| parse_kline_row(row)).collect()
    }

    async fn open_interest(&self, symbol: &str) -> Result<f64> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct OpenInterestResponse {
            open_interest: String,
        }

        let url = format!("{}/fapi/v1/openInterest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .with_context(|| format!("open interest request for {symbol} failed"))?;
        let response = ensure_success(response).await?;

        let payload: OpenInterestResponse = response
            .json()
            .await
            .with_context(|| format!("open interest payload for {symbol} did not decode"))?;
        payload
            .open_interest
            .parse()
            .with_context(|| format!("open interest value {:?} is not a number", payload.open_interest))
    }

    async fn funding_rate(&self, symbol: &str) -> Result<f64> {
        // the premium index carries the latest funding rate
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PremiumIndexResponse {
            last_funding_rate: String,
        }

        let url = format!("{}/fapi/v1/premiumIndex", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .with_context(|| format!("premium index request for {symbol} failed"))?;
        let response = ensure_success(response).await?;

        let payload: PremiumIndexResponse = response
            .json()
            .await
            .with_context(|| format!("premium index payload for {symbol} did not decode"))?;
        payload
            .last_funding_rate
            .parse()
            .with_context(|| format!("funding rate {:?} is not a number", payload.last_funding_rate))
    }
}

/// One kline row is a positional array:
/// `[open_time, open, high, low, close, volume, close_time, ...]` with
/// prices and volume as strings.
fn parse_kline_row(row: &[Value]) -> Result<Candle> {
    if row.len() < 7 {
        return Err(anyhow!("kline row has {} fields, expected at least 7", row.len()));
    }

    Ok(Candle::new(
        value_as_i64(&row[0])?,
        value_as_f64(&row[1])?,
        value_as_f64(&row[2])?,
        value_as_f64(&row[3])?,
        value_as_f64(&row[4])?,
        value_as_f64(&row[5])?,
        value_as_i64(&row[6])?,
    ))
}

fn value_as_f64(value: &Value) -> Result<f64> {
    match value {
        Value::String(s) => s
            .parse()
            .with_context(|| format!("{s:?} is not a number")),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| anyhow!("{n} does not fit an f64")),
        other => Err(anyhow!("unsupported numeric value: {other:?}")),
    }
}

fn value_as_i64(value: &Value) -> Result<i64> {
    match value {
        Value::String(s) => s
            .parse()
            .with_context(|| format!("{s:?} is not an integer")),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| anyhow!("{n} does not fit an i64")),
        other => Err(anyhow!("unsupported numeric value: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_raw_kline_row() {
        let row = vec![
            json!(1700000000000i64),
            json!("42000.5"),
            json!("42100.0"),
            json!("41900.25"),
            json!("42050.75"),
            json!("123.4"),
            json!(1700000179999i64),
            json!("ignored"),
        ];

        let candle = parse_kline_row(&row).unwrap();
        assert_eq!(candle.open_time, 1700000000000);
        assert_eq!(candle.open, 42000.5);
        assert_eq!(candle.high, 42100.0);
        assert_eq!(candle.low, 41900.25);
        assert_eq!(candle.close, 42050.75);
        assert_eq!(candle.volume, 123.4);
        assert_eq!(candle.close_time, 1700000179999);
    }

    #[test]
    fn short_rows_are_rejected() {
        let row = vec![json!(0), json!("1.0")];
        assert!(parse_kline_row(&row).is_err());
    }

    #[test]
    fn malformed_prices_are_rejected() {
        let row = vec![
            json!(0),
            json!("not-a-price"),
            json!("1"),
            json!("1"),
            json!("1"),
            json!("1"),
            json!(1),
        ];
        assert!(parse_kline_row(&row).is_err());
    }
}
