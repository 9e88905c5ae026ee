//! Cross-timeframe confluence scoring

use crate::levels::merge::{rank_levels, update_distances};
use crate::levels::PriceLevel;

/// Discount applied to a base level's own score and strength before the
/// corroborating timeframes are added in; the base timeframe is usually
/// the noisiest one.
const BASE_DISCOUNT: f64 = 0.5;

/// One timeframe's levels plus the weight its corroboration carries.
pub(crate) struct WeightedLevelSet<'a> {
    pub levels: &'a [PriceLevel],
    pub weight: f64,
}

/// Promote base levels that at least one other timeframe corroborates
/// within `tolerance`.
///
/// Sets are scanned in the order given (weight-table order); the first
/// matching level of the first matching set contributes its weighted
/// score and strength, and the scan stops there. Later timeframes are
/// not merged in for that base level. Unmatched base levels are dropped.
pub(crate) fn find_confluence_levels(
    base: &[PriceLevel],
    sets: &[WeightedLevelSet<'_>],
    tolerance: f64,
    current_price: f64,
    is_support: bool,
) -> Vec<PriceLevel> {
    if base.is_empty() || sets.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<PriceLevel> = Vec::new();

    for level in base {
        let mut combined = level.clone();
        combined.score *= BASE_DISCOUNT;
        combined.strength = (combined.strength as f64 * BASE_DISCOUNT).round() as u32;

        let mut matched = false;
        'sets: for set in sets {
            for other in set.levels {
                let denom = (level.price + other.price) / 2.0;
                if denom == 0.0 {
                    continue;
                }
                if ((level.price - other.price) / denom).abs() <= tolerance {
                    matched = true;
                    combined.score += other.score * set.weight;
                    combined.strength += (other.strength as f64 * set.weight).round() as u32;
                    break 'sets;
                }
            }
        }

        if matched {
            result.push(combined);
        }
    }

    if result.is_empty() {
        return result;
    }

    update_distances(&mut result, current_price);
    rank_levels(result, is_support)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: f64, strength: u32, score: f64) -> PriceLevel {
        PriceLevel {
            price,
            strength,
            score,
            distance: 0.0,
            is_support: true,
        }
    }

    #[test]
    fn first_matching_set_wins_and_later_ones_are_ignored() {
        let base = vec![level(100.0, 2, 2.0)];
        let near = vec![level(100.1, 1, 3.0)];
        let far_heavier = vec![level(100.05, 10, 10.0)];
        let sets = vec![
            WeightedLevelSet { levels: &near, weight: 1.0 },
            WeightedLevelSet { levels: &far_heavier, weight: 1.4 },
        ];

        let result = find_confluence_levels(&base, &sets, 0.002, 105.0, true);

        assert_eq!(result.len(), 1);
        // base discounted by 0.5, then only the first set's contribution
        assert!((result[0].score - (2.0 * 0.5 + 3.0 * 1.0)).abs() < 1e-12);
        assert_eq!(result[0].strength, 1 + 1);
    }

    #[test]
    fn unmatched_base_levels_are_dropped() {
        let base = vec![level(100.0, 2, 2.0), level(120.0, 4, 4.0)];
        let other = vec![level(100.1, 1, 1.0)];
        let sets = vec![WeightedLevelSet { levels: &other, weight: 1.2 }];

        let result = find_confluence_levels(&base, &sets, 0.002, 130.0, true);

        assert_eq!(result.len(), 1);
        assert!(result[0].price < 110.0);
    }

    #[test]
    fn empty_inputs_yield_no_confluence() {
        assert!(find_confluence_levels(&[], &[], 0.002, 100.0, true).is_empty());
        let base = vec![level(100.0, 1, 1.0)];
        assert!(find_confluence_levels(&base, &[], 0.002, 100.0, true).is_empty());
    }

    #[test]
    fn weighted_contribution_is_rounded_into_strength() {
        let base = vec![level(100.0, 3, 2.0)];
        let other = vec![level(100.1, 3, 2.0)];
        let sets = vec![WeightedLevelSet { levels: &other, weight: 1.8 }];

        let result = find_confluence_levels(&base, &sets, 0.002, 105.0, true);

        assert_eq!(result.len(), 1);
        // round(3 * 0.5) + round(3 * 1.8) = 2 + 5
        assert_eq!(result[0].strength, 7);
        assert!((result[0].score - (2.0 * 0.5 + 2.0 * 1.8)).abs() < 1e-12);
    }
}
