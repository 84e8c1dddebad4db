use crate::model::{
    config::EngineConfig,
    structures::{match_outcome::MatchOutcome, placement::FinishingSlot}
};

/// Converts a finishing order into bounded synthetic pairwise outcomes for
/// the player at `position`: one outcome per opponent within the configured
/// range of list slots on either side, truncated at the list edges. A
/// better (numerically lower) position scores 1.0, worse 0.0, shared 0.5.
///
/// Returns an empty vec when `position` does not appear in the list.
pub fn simulate_matches(position: u32, finishing_list: &[FinishingSlot], config: &EngineConfig) -> Vec<MatchOutcome> {
    let Some(own_index) = finishing_list.iter().position(|slot| slot.position == position) else {
        return Vec::new();
    };

    let range = config.rating.simulation_range;
    let start = own_index.saturating_sub(range);
    let end = (own_index + range).min(finishing_list.len() - 1);

    (start..=end)
        .filter(|index| *index != own_index)
        .map(|index| {
            let opponent = &finishing_list[index];
            let score = match position.cmp(&opponent.position) {
                std::cmp::Ordering::Less => 1.0,
                std::cmp::Ordering::Greater => 0.0,
                std::cmp::Ordering::Equal => 0.5
            };

            MatchOutcome {
                opponent: opponent.rating,
                score
            }
        })
        .collect()
}
