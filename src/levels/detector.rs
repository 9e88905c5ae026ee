//! Local extremum detection and touch scoring

use std::collections::HashMap;

use crate::data::Candle;
use crate::levels::merge::{merge_nearby_levels, rank_levels, update_distances};
use crate::levels::{PriceLevel, MERGE_TOLERANCE};

/// Candles on each side of a candidate that must not beat it.
const NEIGHBOR_WINDOW: usize = 3;
/// Relative distance under which a new extremum duplicates an accepted one.
const DUPLICATE_TOLERANCE: f64 = 0.001;
/// Relative band around a level price that counts as a touch.
const TOUCH_TOLERANCE: f64 = 0.002;

/// A detected local extremum; only lives through detection.
#[derive(Debug, Clone, Copy)]
struct LevelPoint {
    price: f64,
    index: usize,
}

#[derive(Debug, Default)]
struct TouchStats {
    touches: u32,
    weight: f64,
}

/// Detect ranked support and resistance levels over the most recent
/// `lookback` candles. The window's last close decides which side of
/// price a level belongs to.
pub(crate) fn detect_levels(
    candles: &[Candle],
    lookback: usize,
) -> (Vec<PriceLevel>, Vec<PriceLevel>) {
    let start = candles.len().saturating_sub(lookback);
    let recent = &candles[start..];
    let Some(last) = recent.last() else {
        return (Vec::new(), Vec::new());
    };
    let current_price = last.close;

    let minima = find_local_minima(recent);
    let maxima = find_local_maxima(recent);
    let total = recent.len();

    // every extremum starts with the touch at its own bar
    let mut support_stats: HashMap<usize, TouchStats> = minima
        .iter()
        .map(|point| {
            (
                point.index,
                TouchStats {
                    touches: 1,
                    weight: recency_weight(total, point.index),
                },
            )
        })
        .collect();
    let mut resistance_stats: HashMap<usize, TouchStats> = maxima
        .iter()
        .map(|point| {
            (
                point.index,
                TouchStats {
                    touches: 1,
                    weight: recency_weight(total, point.index),
                },
            )
        })
        .collect();

    for (idx, candle) in recent.iter().enumerate() {
        for point in &minima {
            if idx == point.index || point.price <= 0.0 {
                continue;
            }
            if candle.low <= point.price * (1.0 + TOUCH_TOLERANCE)
                && candle.low >= point.price * (1.0 - TOUCH_TOLERANCE)
            {
                if let Some(stats) = support_stats.get_mut(&point.index) {
                    stats.touches += 1;
                    stats.weight += recency_weight(total, idx);
                }
            }
        }

        for point in &maxima {
            if idx == point.index || point.price <= 0.0 {
                continue;
            }
            if candle.high >= point.price * (1.0 - TOUCH_TOLERANCE)
                && candle.high <= point.price * (1.0 + TOUCH_TOLERANCE)
            {
                if let Some(stats) = resistance_stats.get_mut(&point.index) {
                    stats.touches += 1;
                    stats.weight += recency_weight(total, idx);
                }
            }
        }
    }

    let mut supports: Vec<PriceLevel> = minima
        .iter()
        .filter(|point| point.price < current_price)
        .filter_map(|point| {
            support_stats.get(&point.index).map(|stats| PriceLevel {
                price: point.price,
                strength: stats.touches,
                score: stats.weight,
                distance: 0.0,
                is_support: true,
            })
        })
        .collect();
    let mut resistances: Vec<PriceLevel> = maxima
        .iter()
        .filter(|point| point.price > current_price)
        .filter_map(|point| {
            resistance_stats.get(&point.index).map(|stats| PriceLevel {
                price: point.price,
                strength: stats.touches,
                score: stats.weight,
                distance: 0.0,
                is_support: false,
            })
        })
        .collect();

    supports = merge_nearby_levels(supports, MERGE_TOLERANCE);
    resistances = merge_nearby_levels(resistances, MERGE_TOLERANCE);

    update_distances(&mut supports, current_price);
    update_distances(&mut resistances, current_price);

    (
        rank_levels(supports, true),
        rank_levels(resistances, false),
    )
}

/// Recency factor for a touch at `index`: linear ramp from 0.5 at the
/// oldest candle to 1.0 at the newest.
fn recency_weight(total: usize, index: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    let index = index.min(total - 1);
    0.5 + 0.5 * (index as f64 / (total - 1) as f64)
}

/// A candle is a local minimum when no candle within the neighbor window
/// has a strictly lower low; ties keep the candidate. Candidates within
/// [`DUPLICATE_TOLERANCE`] of an accepted minimum are discarded.
fn find_local_minima(candles: &[Candle]) -> Vec<LevelPoint> {
    let mut minima: Vec<LevelPoint> = Vec::new();

    for i in NEIGHBOR_WINDOW..candles.len().saturating_sub(NEIGHBOR_WINDOW) {
        let current_low = candles[i].low;
        let is_local_min = (i - NEIGHBOR_WINDOW..=i + NEIGHBOR_WINDOW)
            .all(|j| j == i || candles[j].low >= current_low);
        if !is_local_min {
            continue;
        }

        let duplicate = minima
            .iter()
            .any(|existing| ((existing.price - current_low) / current_low).abs() < DUPLICATE_TOLERANCE);
        if !duplicate {
            minima.push(LevelPoint {
                price: current_low,
                index: i,
            });
        }
    }

    minima
}

fn find_local_maxima(candles: &[Candle]) -> Vec<LevelPoint> {
    let mut maxima: Vec<LevelPoint> = Vec::new();

    for i in NEIGHBOR_WINDOW..candles.len().saturating_sub(NEIGHBOR_WINDOW) {
        let current_high = candles[i].high;
        let is_local_max = (i - NEIGHBOR_WINDOW..=i + NEIGHBOR_WINDOW)
            .all(|j| j == i || candles[j].high <= current_high);
        if !is_local_max {
            continue;
        }

        let duplicate = maxima
            .iter()
            .any(|existing| ((existing.price - current_high) / current_high).abs() < DUPLICATE_TOLERANCE);
        if !duplicate {
            maxima.push(LevelPoint {
                price: current_high,
                index: i,
            });
        }
    }

    maxima
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_weight_ramps_from_half_to_one() {
        assert_eq!(recency_weight(1, 0), 1.0);
        assert_eq!(recency_weight(120, 0), 0.5);
        assert_eq!(recency_weight(120, 119), 1.0);
        let mid = recency_weight(101, 50);
        assert!((mid - 0.75).abs() < 1e-12);
    }

    #[test]
    fn boundary_candles_are_never_candidates() {
        // v-shape with the minimum inside the first three candles
        let lows = [1.0, 0.5, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
        let candles: Vec<Candle> = lows
            .iter()
            .enumerate()
            .map(|(i, &low)| Candle::new(i as i64, low + 1.0, low + 2.0, low, low + 1.0, 0.0, i as i64))
            .collect();
        assert!(find_local_minima(&candles).is_empty());
    }

    #[test]
    fn duplicate_minima_are_suppressed() {
        // two dips at nearly the same price, far enough apart in time;
        // the rising baseline keeps flat-tie candidates out of the way
        let mut lows: Vec<f64> = (0..20).map(|i| 10.0 + i as f64 * 0.1).collect();
        lows[5] = 9.0;
        lows[14] = 9.005; // within 0.1% of the first dip
        let candles: Vec<Candle> = lows
            .iter()
            .enumerate()
            .map(|(i, &low)| Candle::new(i as i64, low + 1.0, low + 2.0, low, low + 1.0, 0.0, i as i64))
            .collect();
        let minima = find_local_minima(&candles);
        assert_eq!(minima.len(), 1);
        assert_eq!(minima[0].price, 9.0);
        assert_eq!(minima[0].index, 5);
    }
}
