use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::model::{
    config::EngineConfig,
    structures::{
        match_outcome::MatchOutcome,
        rating_state::{RatingSnapshot, RatingState}
    }
};

/// Glicko scale factor: ln(10) / 400.
const Q: f64 = std::f64::consts::LN_10 / 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingUpdate {
    pub new_rating: f64,
    pub new_uncertainty: f64,
    pub change: f64
}

/// Starting state for a player with no history: the default rating at
/// maximum uncertainty.
pub fn new_rating(config: &EngineConfig) -> RatingState {
    RatingState {
        rating: config.rating.default_rating,
        uncertainty: config.rating.max_uncertainty
    }
}

/// A player stays provisional until their event count reaches the rated
/// threshold.
pub fn is_provisional(event_count: u32, config: &EngineConfig) -> bool {
    event_count < config.rating.provisional_event_threshold
}

/// Batch rating update from a set of simulated outcomes.
///
/// Each opponent's contribution is weighted by `g` over the combined
/// uncertainty of both players, so results against highly uncertain
/// opponents move the rating less than the same results against known
/// quantities. The expected-vs-actual deltas are summed across the batch;
/// a non-empty batch always tightens the uncertainty. The new rating is
/// rounded to 2 decimals and the uncertainty clamped to the configured
/// bounds. An empty batch returns the input unchanged.
///
/// Concurrent updates for the same player must be applied sequentially by
/// the caller; the engine holds no per-player state of its own.
pub fn update_rating(current: &RatingState, outcomes: &[MatchOutcome], config: &EngineConfig) -> RatingUpdate {
    if outcomes.is_empty() {
        return RatingUpdate {
            new_rating: current.rating,
            new_uncertainty: current.uncertainty,
            change: 0.0
        };
    }

    let bounds = &config.rating;
    let sigma = current.uncertainty.clamp(bounds.min_uncertainty, bounds.max_uncertainty);

    let mut dispersion_inverse = 0.0;
    let mut weighted_delta = 0.0;
    for outcome in outcomes {
        let combined = sigma.hypot(outcome.opponent.uncertainty);
        let weight = g(combined);
        let expected = expected_score(current.rating, outcome.opponent.rating, weight);

        dispersion_inverse += weight * weight * expected * (1.0 - expected);
        weighted_delta += weight * (outcome.score - expected);
    }
    dispersion_inverse *= Q * Q;

    let new_variance = 1.0 / (1.0 / (sigma * sigma) + dispersion_inverse);
    let new_uncertainty = new_variance
        .sqrt()
        .clamp(bounds.min_uncertainty, bounds.max_uncertainty);
    let new_rating = round_2dp(current.rating + Q * new_variance * weighted_delta);

    RatingUpdate {
        new_rating,
        new_uncertainty,
        change: new_rating - current.rating
    }
}

/// Widens a snapshot's uncertainty for time away, leaving the rating value
/// untouched. Returns a fresh snapshot stamped `now`; the input is not
/// mutated, and the result never exceeds the configured maximum.
pub fn apply_inactivity_decay(
    current: &RatingSnapshot,
    days_inactive: u32,
    now: DateTime<FixedOffset>,
    config: &EngineConfig
) -> RatingSnapshot {
    let widened = current.uncertainty + days_inactive as f64 * config.rating.uncertainty_decay_per_day;

    RatingSnapshot {
        rating: current.rating,
        uncertainty: widened.min(config.rating.max_uncertainty),
        timestamp: now
    }
}

/// Glicko weighting: shrinks toward 0 as uncertainty grows.
fn g(uncertainty: f64) -> f64 {
    1.0 / (1.0 + 3.0 * Q * Q * uncertainty * uncertainty / (std::f64::consts::PI * std::f64::consts::PI)).sqrt()
}

fn expected_score(rating: f64, opponent_rating: f64, weight: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-weight * (rating - opponent_rating) / 400.0))
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::Duration;

    use super::*;

    fn state(rating: f64, uncertainty: f64) -> RatingState {
        RatingState { rating, uncertainty }
    }

    fn outcome(rating: f64, uncertainty: f64, score: f64) -> MatchOutcome {
        MatchOutcome {
            opponent: state(rating, uncertainty),
            score
        }
    }

    #[test]
    fn new_rating_starts_at_default_with_max_uncertainty() {
        let config = EngineConfig::default();
        let rating = new_rating(&config);

        assert_abs_diff_eq!(rating.rating, 1500.0);
        assert_abs_diff_eq!(rating.uncertainty, 350.0);
    }

    #[test]
    fn provisional_until_the_event_threshold() {
        let config = EngineConfig::default();

        assert!(is_provisional(0, &config));
        assert!(is_provisional(4, &config));
        assert!(!is_provisional(5, &config));
        assert!(!is_provisional(12, &config));
    }

    #[test]
    fn win_over_equal_opponent_raises_rating_and_tightens_uncertainty() {
        let config = EngineConfig::default();
        let update = update_rating(&state(1500.0, 100.0), &[outcome(1500.0, 100.0, 1.0)], &config);

        assert!(update.new_rating > 1500.0);
        assert!(update.new_uncertainty < 100.0);
        assert!(update.change > 0.0);
    }

    #[test]
    fn loss_to_equal_opponent_lowers_rating() {
        let config = EngineConfig::default();
        let update = update_rating(&state(1500.0, 100.0), &[outcome(1500.0, 100.0, 0.0)], &config);

        assert!(update.new_rating < 1500.0);
        assert!(update.change < 0.0);
    }

    #[test]
    fn draw_with_equal_opponent_barely_moves_rating() {
        let config = EngineConfig::default();
        let update = update_rating(&state(1500.0, 100.0), &[outcome(1500.0, 100.0, 0.5)], &config);

        assert!(update.change.abs() < 5.0);
    }

    #[test]
    fn upset_win_gains_more_than_expected_win() {
        let config = EngineConfig::default();
        let upset = update_rating(&state(1500.0, 100.0), &[outcome(1700.0, 100.0, 1.0)], &config);
        let expected = update_rating(&state(1500.0, 100.0), &[outcome(1300.0, 100.0, 1.0)], &config);

        assert!(upset.change > expected.change);
        assert!(expected.change > 0.0);
    }

    #[test]
    fn uncertain_opponents_move_the_rating_less() {
        let config = EngineConfig::default();
        let vs_certain = update_rating(&state(1500.0, 100.0), &[outcome(1500.0, 60.0, 1.0)], &config);
        let vs_uncertain = update_rating(&state(1500.0, 100.0), &[outcome(1500.0, 300.0, 1.0)], &config);

        assert!(vs_certain.change > vs_uncertain.change);
        assert!(vs_uncertain.change > 0.0);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let config = EngineConfig::default();
        let update = update_rating(&state(1483.27, 117.0), &[], &config);

        assert_abs_diff_eq!(update.new_rating, 1483.27);
        assert_abs_diff_eq!(update.new_uncertainty, 117.0);
        assert_eq!(update.change, 0.0);
    }

    #[test]
    fn larger_batches_tighten_uncertainty_further() {
        let config = EngineConfig::default();
        let one = update_rating(&state(1500.0, 200.0), &[outcome(1500.0, 100.0, 1.0)], &config);
        let batch: Vec<MatchOutcome> = (0..4).map(|_| outcome(1500.0, 100.0, 1.0)).collect();
        let four = update_rating(&state(1500.0, 200.0), &batch, &config);

        assert!(four.new_uncertainty < one.new_uncertainty);
    }

    #[test]
    fn uncertainty_never_drops_below_the_floor() {
        let config = EngineConfig::default();
        let batch: Vec<MatchOutcome> = (0..500).map(|_| outcome(1500.0, 60.0, 1.0)).collect();
        let update = update_rating(&state(1500.0, 55.0), &batch, &config);

        assert!(update.new_uncertainty >= config.rating.min_uncertainty);
    }

    #[test]
    fn rating_is_rounded_to_two_decimals() {
        let config = EngineConfig::default();
        let update = update_rating(&state(1500.0, 100.0), &[outcome(1620.0, 90.0, 1.0)], &config);

        assert_abs_diff_eq!(update.new_rating, round_2dp(update.new_rating));
    }

    #[test]
    fn inactivity_decay_widens_without_touching_rating() {
        let config = EngineConfig::default();
        let now: DateTime<FixedOffset> = "2026-06-01T00:00:00-00:00".parse().unwrap();
        let snapshot = RatingSnapshot {
            rating: 1612.5,
            uncertainty: 120.0,
            timestamp: now - Duration::days(200)
        };

        let decayed = apply_inactivity_decay(&snapshot, 200, now, &config);

        assert_abs_diff_eq!(decayed.rating, 1612.5);
        assert_abs_diff_eq!(decayed.uncertainty, 170.0);
        assert_eq!(decayed.timestamp, now);
        // The input snapshot is untouched.
        assert_abs_diff_eq!(snapshot.uncertainty, 120.0);
    }

    #[test]
    fn inactivity_decay_caps_at_max_and_never_decreases() {
        let config = EngineConfig::default();
        let now: DateTime<FixedOffset> = "2026-06-01T00:00:00-00:00".parse().unwrap();
        let snapshot = RatingSnapshot {
            rating: 1500.0,
            uncertainty: 340.0,
            timestamp: now
        };

        let unchanged = apply_inactivity_decay(&snapshot, 0, now, &config);
        assert_abs_diff_eq!(unchanged.uncertainty, 340.0);

        let capped = apply_inactivity_decay(&snapshot, 10_000, now, &config);
        assert_abs_diff_eq!(capped.uncertainty, config.rating.max_uncertainty);
    }
}
