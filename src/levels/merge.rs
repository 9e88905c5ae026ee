//! Level merging, distance bookkeeping and ranking

use crate::levels::{PriceLevel, MAX_LEVELS};

/// Merge levels lying within `tolerance` relative distance of each other.
///
/// Levels are walked in price order; each run of close levels collapses
/// into one whose price is the score-weighted mean (strength-weighted,
/// then plain mean, when the total score is not positive) and whose
/// strength and score are the sums of the run.
pub(crate) fn merge_nearby_levels(levels: Vec<PriceLevel>, tolerance: f64) -> Vec<PriceLevel> {
    let mut levels = levels;
    levels.sort_by(|a, b| a.price.total_cmp(&b.price));

    let mut merged: Vec<PriceLevel> = Vec::with_capacity(levels.len());
    let mut iter = levels.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };
    current.distance = 0.0;

    for level in iter {
        let mut denom = (current.price + level.price) / 2.0;
        if denom == 0.0 {
            denom = 1.0;
        }
        if ((level.price - current.price) / denom).abs() <= tolerance {
            current.price = merged_price(&current, &level);
            current.strength += level.strength;
            current.score += level.score;
        } else {
            merged.push(current);
            current = level;
            current.distance = 0.0;
        }
    }
    merged.push(current);

    merged
}

fn merged_price(a: &PriceLevel, b: &PriceLevel) -> f64 {
    let total_score = a.score + b.score;
    if total_score > 0.0 {
        return (a.price * a.score + b.price * b.score) / total_score;
    }

    let total_strength = (a.strength + b.strength) as f64;
    if total_strength > 0.0 {
        return (a.price * a.strength as f64 + b.price * b.strength as f64) / total_strength;
    }

    (a.price + b.price) / 2.0
}

/// Recompute each level's percent distance from `current_price`.
pub(crate) fn update_distances(levels: &mut [PriceLevel], current_price: f64) {
    if current_price <= 0.0 {
        return;
    }
    for level in levels {
        level.distance = ((current_price - level.price) / current_price * 100.0).abs();
    }
}

/// Rank levels and keep the strongest.
///
/// Primary order: score desc, then strength desc, then distance asc; full
/// ties go to the level nearer the current price (supports: higher price,
/// resistances: lower). The surviving top [`MAX_LEVELS`] are then
/// re-sorted by ascending distance; ranking order and display order are
/// deliberately different passes.
pub(crate) fn rank_levels(mut levels: Vec<PriceLevel>, is_support: bool) -> Vec<PriceLevel> {
    if levels.is_empty() {
        return levels;
    }

    let nearer_price = move |a: &PriceLevel, b: &PriceLevel| {
        if is_support {
            b.price.total_cmp(&a.price)
        } else {
            a.price.total_cmp(&b.price)
        }
    };

    levels.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.strength.cmp(&a.strength))
            .then_with(|| a.distance.total_cmp(&b.distance))
            .then_with(|| nearer_price(a, b))
    });

    levels.truncate(MAX_LEVELS);

    levels.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| nearer_price(a, b)));

    levels
}
