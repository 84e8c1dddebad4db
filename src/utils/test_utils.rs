use chrono::{DateTime, Duration, FixedOffset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::structures::{
    placement::{FinishingSlot, Placement},
    player::Player,
    rating_state::RatingState
};

pub fn generate_player(id: i32, rating: f64, is_rated: bool, world_ranking: Option<u32>) -> Player {
    Player {
        id,
        rating,
        uncertainty: 100.0,
        world_ranking,
        is_rated,
        event_count: if is_rated { 10 } else { 1 }
    }
}

/// A rated field of `count` players with ratings spread evenly across
/// `[rating_floor, rating_ceiling]`. Seeded so repeated runs agree.
pub fn generate_rated_field(count: usize, rating_floor: f64, rating_ceiling: f64) -> Vec<Player> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    (0..count)
        .map(|i| {
            let rating = rng.random_range(rating_floor..=rating_ceiling);
            generate_player(i as i32 + 1, rating, true, None)
        })
        .collect()
}

pub fn generate_finishing_order(count: u32) -> Vec<Placement> {
    (1..=count)
        .map(|position| Placement {
            player_id: position as i32,
            position
        })
        .collect()
}

/// Finishing slots in position order, best finisher carrying the highest
/// rating and each later position 50 points below the previous.
pub fn generate_finishing_slots(count: u32, top_rating: f64) -> Vec<FinishingSlot> {
    (1..=count)
        .map(|position| FinishingSlot {
            position,
            rating: RatingState {
                rating: top_rating - 50.0 * (position - 1) as f64,
                uncertainty: 100.0
            }
        })
        .collect()
}

pub fn generate_event_date(days_ago: i64) -> DateTime<FixedOffset> {
    let base: DateTime<FixedOffset> = "2026-06-01T00:00:00-00:00".parse().unwrap();
    base - Duration::days(days_ago)
}
