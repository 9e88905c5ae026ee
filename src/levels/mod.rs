//! Multi-timeframe support/resistance detection
//!
//! Per timeframe: local extrema in a bounded lookback window are scored by
//! recency-weighted touch counts, merged when close, filtered to the
//! correct side of price, and ranked. Across timeframes: a base
//! timeframe's levels that are corroborated by a longer timeframe within
//! tolerance are promoted to confluence levels.

mod confluence;
mod detector;
mod merge;

use std::collections::HashMap;

use crate::data::{Candle, Timeframe};
use confluence::{find_confluence_levels, WeightedLevelSet};
use detector::detect_levels;

/// Candles inspected per timeframe when hunting for levels.
pub const SR_LOOKBACK: usize = 120;
/// Relative distance under which two levels are considered the same.
pub const MERGE_TOLERANCE: f64 = 0.002;
/// Relative distance for cross-timeframe corroboration.
pub const CONFLUENCE_TOLERANCE: f64 = 0.002;
/// Levels kept per side per timeframe after ranking.
pub const MAX_LEVELS: usize = 5;

/// One support or resistance level.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    /// Level price.
    pub price: f64,
    /// Touch count inside the lookback window.
    pub strength: u32,
    /// Recency-weighted touch accumulation.
    pub score: f64,
    /// Percent distance from the current price, always non-negative.
    pub distance: f64,
    /// Supports sit below the current price, resistances above.
    pub is_support: bool,
}

/// Ranked support and resistance levels for one timeframe.
#[derive(Debug, Clone, Default)]
pub struct TimeframeLevels {
    pub supports: Vec<PriceLevel>,
    pub resistances: Vec<PriceLevel>,
}

/// Base-timeframe levels corroborated by at least one longer timeframe.
#[derive(Debug, Clone, Default)]
pub struct ConfluenceLevels {
    pub supports: Vec<PriceLevel>,
    pub resistances: Vec<PriceLevel>,
}

/// Support/resistance state across every timeframe with data.
#[derive(Debug, Clone, Default)]
pub struct SupportResistanceSummary {
    pub timeframes: HashMap<Timeframe, TimeframeLevels>,
    pub confluence: Option<ConfluenceLevels>,
}

/// Timeframes eligible to anchor the confluence scan, shortest first.
const BASE_ORDER: [Timeframe; 4] = [Timeframe::M3, Timeframe::M15, Timeframe::H1, Timeframe::H4];

/// Detect, rank and cross-reference levels for every timeframe in
/// `inputs`. Timeframes with no candles or no surviving levels are left
/// out of the summary. `current_price` anchors the confluence distances.
pub fn summarize(inputs: &[(Timeframe, &[Candle])], current_price: f64) -> SupportResistanceSummary {
    let mut summary = SupportResistanceSummary::default();

    for (timeframe, candles) in inputs {
        if candles.is_empty() {
            continue;
        }

        let (supports, resistances) = detect_levels(candles, SR_LOOKBACK);
        if supports.is_empty() && resistances.is_empty() {
            continue;
        }

        summary
            .timeframes
            .insert(*timeframe, TimeframeLevels { supports, resistances });
    }

    let Some((base_timeframe, base)) = BASE_ORDER
        .iter()
        .find_map(|tf| summary.timeframes.get(tf).map(|levels| (*tf, levels)))
    else {
        return summary;
    };

    let mut support_sets = Vec::new();
    let mut resistance_sets = Vec::new();
    for timeframe in Timeframe::ALL {
        if timeframe == base_timeframe {
            continue;
        }
        if let Some(levels) = summary.timeframes.get(&timeframe) {
            let weight = timeframe.confluence_weight();
            support_sets.push(WeightedLevelSet {
                levels: &levels.supports,
                weight,
            });
            resistance_sets.push(WeightedLevelSet {
                levels: &levels.resistances,
                weight,
            });
        }
    }

    let confluence = if support_sets.is_empty() {
        None
    } else {
        Some(ConfluenceLevels {
            supports: find_confluence_levels(
                &base.supports,
                &support_sets,
                CONFLUENCE_TOLERANCE,
                current_price,
                true,
            ),
            resistances: find_confluence_levels(
                &base.resistances,
                &resistance_sets,
                CONFLUENCE_TOLERANCE,
                current_price,
                false,
            ),
        })
    };
    summary.confluence = confluence;

    summary
}
