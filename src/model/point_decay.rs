use chrono::{DateTime, FixedOffset};

use crate::model::config::EngineConfig;

/// Ages a point total by the event's age in years. Pure function of its
/// inputs; callers persist undecayed points and re-derive this at read
/// time, so retuning the weights re-ages all history with no migration.
pub fn decay_points(
    points: f64,
    event_date: DateTime<FixedOffset>,
    now: DateTime<FixedOffset>,
    config: &EngineConfig
) -> f64 {
    points * decay_weight(event_date, now, config)
}

/// Banded weight per whole year of age. Events older than the configured
/// bands are expired and weigh zero; future-dated events sit in the first
/// band.
fn decay_weight(event_date: DateTime<FixedOffset>, now: DateTime<FixedOffset>, config: &EngineConfig) -> f64 {
    let weights = &config.point_decay.weights;
    let days = (now - event_date).num_days() as f64;
    let age_years = days / config.point_decay.days_per_year;

    if age_years < 0.0 {
        return weights[0];
    }

    match weights.get(age_years.floor() as usize) {
        Some(weight) => *weight,
        None => 0.0
    }
}
