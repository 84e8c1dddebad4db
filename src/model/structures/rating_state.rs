use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A player's skill estimate: Glicko-style mean plus deviation.
/// Higher uncertainty means less confidence in the rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    pub uncertainty: f64
}

/// Timestamped rating state. History is append-only: callers persist a new
/// snapshot after every tournament update, ranking refresh, or inactivity
/// decay, and never overwrite an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub rating: f64,
    pub uncertainty: f64,
    pub timestamp: DateTime<FixedOffset>
}

impl RatingSnapshot {
    pub fn state(&self) -> RatingState {
        RatingState {
            rating: self.rating,
            uncertainty: self.uncertainty
        }
    }
}
