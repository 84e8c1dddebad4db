use serde::Serialize;

use crate::{
    model::{
        config::EngineConfig,
        error::Result,
        format_grade::evaluate_format_grade,
        structures::{certification_tier::CertificationTier, format_spec::FormatSpec, player::Player}
    },
    utils::selection::top_n_by
};

/// Every intermediate of the tournament value computation, so collaborators
/// can display how the first-place value came to be.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentValueBreakdown {
    pub base_value: f64,
    pub rating_adjustment: f64,
    pub ranking_adjustment: f64,
    pub format_grade: f64,
    pub first_place_value: f64
}

/// Computes a tournament's first-place value from its player field, format,
/// and certification tier.
///
/// Pure and deterministic; non-negative; monotonic non-decreasing in rated
/// player count, player rating, and ranking quality. An empty field yields
/// an all-zero breakdown rather than an error.
pub fn calculate_tournament_value(
    players: &[Player],
    spec: &FormatSpec,
    tier: CertificationTier,
    config: &EngineConfig
) -> Result<TournamentValueBreakdown> {
    let format_grade = evaluate_format_grade(spec, players.len(), config)?;

    let base_value = base_value(players, config);
    let rating_adjustment = rating_adjustment(players, config);
    let ranking_adjustment = ranking_adjustment(players, config);

    let raw_value = base_value + rating_adjustment + ranking_adjustment;
    let first_place_value = raw_value * format_grade * tier.booster(config);

    Ok(TournamentValueBreakdown {
        base_value,
        rating_adjustment,
        ranking_adjustment,
        format_grade,
        first_place_value
    })
}

fn base_value(players: &[Player], config: &EngineConfig) -> f64 {
    let rated_count = players.iter().filter(|p| p.is_rated).count() as f64;

    (config.base_value.points_per_player * rated_count).min(config.base_value.value_cap)
}

/// Field-strength credit from the top rated players. Selection orders by
/// rating descending, ties broken by lower player id.
fn rating_adjustment(players: &[Player], config: &EngineConfig) -> f64 {
    let adjustment = &config.value_adjustment;
    let rated: Vec<&Player> = players.iter().filter(|p| p.is_rated).collect();

    let top = top_n_by(&rated, adjustment.rating_top_n, |a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let sum: f64 = top
        .iter()
        .filter(|p| p.rating >= adjustment.min_effective_rating)
        .map(|p| (p.rating * adjustment.rating_coefficient - adjustment.rating_offset).max(0.0))
        .sum();

    sum.min(adjustment.rating_cap)
}

/// Field-strength credit from the top world-ranked players. Selection is
/// independent of the rating ordering: it considers only players with a
/// ranking, best (lowest) ranking first, ties broken by lower player id.
fn ranking_adjustment(players: &[Player], config: &EngineConfig) -> f64 {
    let adjustment = &config.value_adjustment;
    let ranked: Vec<(i32, u32)> = players
        .iter()
        .filter_map(|p| p.world_ranking.map(|rank| (p.id, rank)))
        .collect();

    let top = top_n_by(&ranked, adjustment.ranking_top_n, |a, b| {
        a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0))
    });

    let sum: f64 = top
        .iter()
        .map(|(_, rank)| {
            ((*rank as f64).ln() * adjustment.ranking_coefficient + adjustment.ranking_offset).max(0.0)
        })
        .sum();

    sum.min(adjustment.ranking_cap)
}
