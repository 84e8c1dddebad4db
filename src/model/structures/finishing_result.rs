use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::{aggregation::EventPoints, config::EngineConfig, point_decay::decay_points};

/// A player's finishing record for one event, with the undecayed point
/// components. Only these and the event date are persisted; decayed points
/// are always recomputed at read time from the event's age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingResult {
    pub player_id: i32,
    /// Dense 1-based finishing position.
    pub position: u32,
    pub event_date: DateTime<FixedOffset>,
    pub flat_points: f64,
    pub shaped_points: f64,
    pub total_points: f64
}

impl FinishingResult {
    pub fn from_award(award: &PointAward, event_date: DateTime<FixedOffset>) -> Self {
        FinishingResult {
            player_id: award.player_id,
            position: award.position,
            event_date,
            flat_points: award.flat_points,
            shaped_points: award.shaped_points,
            total_points: award.total_points
        }
    }

    /// The result's current worth, aged to `now`.
    pub fn decayed_points(&self, now: DateTime<FixedOffset>, config: &EngineConfig) -> f64 {
        decay_points(self.total_points, self.event_date, now, config)
    }

    /// The ranking aggregator's view of this result at `now`.
    pub fn event_points(&self, now: DateTime<FixedOffset>, config: &EngineConfig) -> EventPoints {
        EventPoints {
            decayed_points: self.decayed_points(now, config),
            event_date: self.event_date
        }
    }
}

/// Per-position award computed by the point distribution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAward {
    pub player_id: i32,
    pub position: u32,
    pub flat_points: f64,
    pub shaped_points: f64,
    pub total_points: f64
}
