use serde::{Deserialize, Serialize};

use crate::model::structures::rating_state::RatingState;

/// A single row of a finishing order: who ended where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub player_id: i32,
    /// Dense 1-based finishing position.
    pub position: u32
}

/// Finishing-order entry carrying the rating the match simulator scores
/// opponents with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishingSlot {
    pub position: u32,
    pub rating: RatingState
}
