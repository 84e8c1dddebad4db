use serde::{Deserialize, Serialize};

use crate::model::config::EngineConfig;

/// Engine view of a player. Identity plus the numeric inputs the value and
/// rating formulas read; mutation happens outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub rating: f64,
    pub uncertainty: f64,
    /// Best current world ranking, if the player has one. Lower is better.
    pub world_ranking: Option<u32>,
    pub is_rated: bool,
    pub event_count: u32
}

impl Player {
    /// Whether the event count alone qualifies the player as rated.
    pub fn is_rated_by_events(&self, config: &EngineConfig) -> bool {
        self.event_count >= config.rating.provisional_event_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_once_event_count_reaches_threshold() {
        let config = EngineConfig::default();
        let mut player = Player {
            id: 1,
            rating: 1500.0,
            uncertainty: 350.0,
            world_ranking: None,
            is_rated: false,
            event_count: 4
        };

        assert!(!player.is_rated_by_events(&config));
        player.event_count = 5;
        assert!(player.is_rated_by_events(&config));
    }
}
