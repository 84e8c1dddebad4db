use itertools::Itertools;

use crate::model::{
    config::EngineConfig,
    error::{EngineError, Result},
    structures::{finishing_result::PointAward, placement::Placement}
};

/// Splits the first-place value into per-position awards.
///
/// Every finisher receives the same flat share; the shaped share tapers
/// from the full shaped fraction at position 1 down to zero. Because the
/// flat and shaped fractions sum to 1 (validated at resolve time), position
/// 1's total always equals the first-place value, whatever the tuning.
///
/// `rated_player_count` drives the taper width: the shaped curve runs out
/// at `min(rated_player_count / 2, dynamic_player_cap)` positions.
pub fn distribute_points(
    placements: &[Placement],
    first_place_value: f64,
    rated_player_count: usize,
    config: &EngineConfig
) -> Result<Vec<PointAward>> {
    validate_dense(placements)?;

    let distribution = &config.distribution;
    let flat = first_place_value * distribution.flat_fraction;
    let taper_width = (rated_player_count as f64 / 2.0)
        .min(distribution.dynamic_player_cap)
        .max(1.0);

    let awards = placements
        .iter()
        .sorted_by_key(|p| p.position)
        .map(|placement| {
            let ratio = (placement.position - 1) as f64 / taper_width;
            let curve = (1.0 - ratio.powf(distribution.position_exponent))
                .max(0.0)
                .powf(distribution.value_exponent);
            let shaped = first_place_value * distribution.shaped_fraction * curve;

            PointAward {
                player_id: placement.player_id,
                position: placement.position,
                flat_points: flat,
                shaped_points: shaped,
                total_points: flat + shaped
            }
        })
        .collect();

    Ok(awards)
}

/// Positions must be exactly 1..=N with no duplicates or gaps.
fn validate_dense(placements: &[Placement]) -> Result<()> {
    if placements.is_empty() {
        return Err(EngineError::EmptyFinishingOrder);
    }

    let positions: Vec<u32> = placements.iter().map(|p| p.position).sorted().collect();
    for (expected, actual) in (1..).zip(positions.iter()) {
        if *actual != expected {
            let reason = if positions.iter().dedup().count() != positions.len() {
                format!("duplicate position {actual}")
            } else {
                format!("expected position {expected}, found {actual}")
            };
            return Err(EngineError::InvalidFinishingOrder { reason });
        }
    }

    Ok(())
}
