//! Engine error types

use thiserror::Error;

use crate::data::Timeframe;

/// Failure modes of snapshot construction.
///
/// Candle history is load-bearing for every downstream computation, so any
/// timeframe's kline fetch failing aborts the whole snapshot. Enrichment
/// failures (open interest, funding rate) are degraded to zero placeholders
/// inside the assembler and never surface here.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A timeframe's candle retrieval failed; no partial snapshot exists.
    #[error("failed to fetch {timeframe} klines: {reason}")]
    KlineFetch {
        timeframe: Timeframe,
        reason: anyhow::Error,
    },

    /// The base timeframe returned no candles at all.
    #[error("{timeframe} kline history is empty")]
    EmptyHistory { timeframe: Timeframe },
}

impl SnapshotError {
    /// The timeframe whose retrieval sank the snapshot.
    pub fn timeframe(&self) -> Timeframe {
        match self {
            Self::KlineFetch { timeframe, .. } => *timeframe,
            Self::EmptyHistory { timeframe } => *timeframe,
        }
    }
}
