//! Time-bounded open-interest cache
//!
//! One whole-market table refreshed in bulk and served per symbol. Any
//! number of readers share the table while it is fresh; a stale lookup
//! takes the write lock and re-checks freshness there, so N concurrent
//! misses collapse into a single upstream refresh.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::info;

use crate::data::OpenInterest;
use crate::exchange::BulkOpenInterestSource;
use crate::Result;

/// How long a refreshed table stays fresh.
pub const DEFAULT_OI_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct CacheState {
    table: HashMap<String, f64>,
    refreshed_at: Option<Instant>,
}

impl CacheState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.refreshed_at
            .map(|at| at.elapsed() < ttl)
            .unwrap_or(false)
    }
}

/// Concurrency-safe cache over a [`BulkOpenInterestSource`].
///
/// Owned and injected rather than process-global, so tests construct
/// isolated instances with their own TTL.
pub struct OpenInterestCache {
    source: Arc<dyn BulkOpenInterestSource>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl OpenInterestCache {
    pub fn new(source: Arc<dyn BulkOpenInterestSource>) -> Self {
        Self::with_ttl(source, DEFAULT_OI_CACHE_TTL)
    }

    pub fn with_ttl(source: Arc<dyn BulkOpenInterestSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Look up one symbol, refreshing the whole table only when stale.
    ///
    /// A symbol missing from a fresh table is a valid unknown and yields
    /// the zero value. Upstream failures propagate to the caller and
    /// leave the previous table in place.
    pub async fn lookup(&self, symbol: &str) -> Result<OpenInterest> {
        {
            let state = self.state.read().await;
            if state.is_fresh(self.ttl) {
                if let Some(&latest) = state.table.get(symbol) {
                    return Ok(OpenInterest::from_latest(latest));
                }
            }
        }

        let mut state = self.state.write().await;
        // another caller may have refreshed while we waited for the lock
        if !state.is_fresh(self.ttl) {
            let table = self.source.open_interest_table().await?;
            info!(entries = table.len(), "refreshed open interest table");
            state.table = table;
            state.refreshed_at = Some(Instant::now());
        }

        Ok(state
            .table
            .get(symbol)
            .map(|&latest| OpenInterest::from_latest(latest))
            .unwrap_or(OpenInterest::ZERO))
    }
}
