use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum QualifyingFormat {
    /// Fixed number of qualifying attempts per player.
    Limited,
    /// Open qualifying for a posted duration; earns the hourly bonus.
    Unlimited
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum FinalsFormat {
    None,
    SingleElimination,
    MatchPlay,
    Ladder,
    BestGame
}

/// Qualifying leg of a tournament format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingSpec {
    pub format: QualifyingFormat,
    pub meaningful_games: u32,
    /// Posted qualifying duration in hours, for unlimited formats.
    pub duration_hours: Option<f64>,
    pub four_player_groups: bool,
    pub three_player_groups: bool
}

/// Finals leg of a tournament format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalsSpec {
    pub format: FinalsFormat,
    pub meaningful_games: u32,
    pub finalist_count: Option<u32>,
    pub four_player_groups: bool,
    pub three_player_groups: bool
}

/// Immutable description of a tournament's structure, consumed by the
/// format grade evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatSpec {
    pub qualifying: QualifyingSpec,
    pub finals: FinalsSpec,
    /// Balls per game, for the 1-ball / 2-ball / 3+ adjustment.
    pub ball_count: u8
}

impl FormatSpec {
    pub fn has_finals(&self) -> bool {
        self.finals.format != FinalsFormat::None
    }
}
