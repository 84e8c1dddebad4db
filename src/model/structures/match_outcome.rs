use serde::{Deserialize, Serialize};

use crate::model::structures::rating_state::RatingState;

/// One synthetic pairwise result produced by the match simulator.
/// `score` is 1.0 for a win, 0.5 for a tie, 0.0 for a loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub opponent: RatingState,
    pub score: f64
}
