use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{model::config::EngineConfig, utils::selection::top_n_by};

/// One event's contribution to a player's world-ranking score: the decayed
/// point value and the date it was earned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPoints {
    pub decayed_points: f64,
    pub event_date: DateTime<FixedOffset>
}

/// Sums a player's best counted events into their world-ranking score.
/// Expired events carry zero decayed points and so contribute nothing even
/// when selected.
pub fn aggregate_ranking(events: &[EventPoints], config: &EngineConfig) -> f64 {
    counted_events(events, config).iter().map(|e| e.decayed_points).sum()
}

/// The events that count: highest decayed points first, ties preferring the
/// more recent event date, then input order.
pub fn counted_events(events: &[EventPoints], config: &EngineConfig) -> Vec<EventPoints> {
    top_n_by(events, config.ranking.counted_events, |a, b| {
        b.decayed_points
            .partial_cmp(&a.decayed_points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.event_date.cmp(&a.event_date))
    })
}
