//! Hyperliquid info-endpoint client for bulk open interest

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::normalize_symbol;
use crate::exchange::{ensure_success, BulkOpenInterestSource};
use crate::Result;

const DEFAULT_INFO_URL: &str = "https://api.hyperliquid.xyz/info";

#[derive(Debug, Serialize)]
struct InfoRequest {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// `metaAndAssetCtxs` responds with a two-element array: the universe
/// metadata and one context entry per asset, in the same order.
#[derive(Debug, Deserialize)]
struct MetaAndAssetCtxs(Meta, Vec<AssetCtx>);

#[derive(Debug, Deserialize)]
struct Meta {
    universe: Vec<UniverseEntry>,
}

#[derive(Debug, Deserialize)]
struct UniverseEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AssetCtx {
    #[serde(rename = "openInterest", default)]
    open_interest: Option<String>,
}

/// Client for the Hyperliquid info endpoint; serves the whole market's
/// open interest in one call.
#[derive(Debug, Clone)]
pub struct HyperliquidClient {
    info_url: String,
    client: reqwest::Client,
}

impl HyperliquidClient {
    /// Client against the production endpoint with the given timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_info_url(DEFAULT_INFO_URL, timeout_secs)
    }

    /// Client against a custom info URL (tests, mirrors).
    pub fn with_info_url(info_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            info_url: info_url.into(),
            client,
        })
    }
}

#[async_trait]
impl BulkOpenInterestSource for HyperliquidClient {
    async fn open_interest_table(&self) -> Result<HashMap<String, f64>> {
        let response = self
            .client
            .post(&self.info_url)
            .json(&InfoRequest {
                kind: "metaAndAssetCtxs",
            })
            .send()
            .await
            .context("hyperliquid info request failed")?;
        let response = ensure_success(response).await?;

        let payload: MetaAndAssetCtxs = response
            .json()
            .await
            .context("hyperliquid metaAndAssetCtxs payload did not decode")?;
        let MetaAndAssetCtxs(meta, asset_ctxs) = payload;

        if meta.universe.len() != asset_ctxs.len() {
            return Err(anyhow!(
                "hyperliquid universe/assetCtxs length mismatch: {} vs {}",
                meta.universe.len(),
                asset_ctxs.len()
            ));
        }

        let mut table = HashMap::with_capacity(meta.universe.len());
        for (entry, ctx) in meta.universe.iter().zip(&asset_ctxs) {
            // individual malformed entries are skipped, not fatal
            let Some(raw) = &ctx.open_interest else {
                continue;
            };
            let Ok(open_interest) = raw.parse::<f64>() else {
                continue;
            };
            // universe names are bare assets; key the table by USDT pair
            table.insert(normalize_symbol(&entry.name), open_interest);
        }

        debug!(entries = table.len(), "decoded hyperliquid open interest table");
        Ok(table)
    }
}
