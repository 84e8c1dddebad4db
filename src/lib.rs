//! Scoring and rating engine for the league tournament ranking platform.
//!
//! Everything in here is synchronous, pure computation: the surrounding
//! application resolves a configuration once per change, feeds well-formed
//! numeric inputs to the formula functions, and persists what they return.
//! The only shared state is the active [`model::config::EngineConfig`]
//! snapshot, swapped atomically by [`model::config::ConfigStore`].

pub mod model;
pub mod utils;

pub use model::{
    aggregation::{aggregate_ranking, EventPoints},
    config::{ConfigStore, EngineConfig, EngineConfigOverlay, CONFIG},
    distribution::distribute_points,
    error::{EngineError, ValidationFailure},
    format_grade::evaluate_format_grade,
    point_decay::decay_points,
    rating::{apply_inactivity_decay, is_provisional, new_rating, update_rating, RatingUpdate},
    simulation::simulate_matches,
    tournament_value::{calculate_tournament_value, TournamentValueBreakdown}
};
