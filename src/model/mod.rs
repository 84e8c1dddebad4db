//! The calculation engine: configuration resolution, tournament value,
//! point distribution and decay, ranking aggregation, and the match
//! simulation / rating update pipeline.
//!
//! Everything here is synchronous and pure given an [`config::EngineConfig`]
//! snapshot. Flow for a submitted tournament: `tournament_value` (using
//! `format_grade`) produces the first-place value, `distribution` splits it
//! into per-position awards, `point_decay` ages awards at read time, and
//! `aggregation` folds a player's best events into their world-ranking
//! score. Independently, `simulation` turns the finishing order into
//! synthetic match outcomes that `rating` applies as a batch update.

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod format_grade;
pub mod point_decay;
pub mod rating;
pub mod simulation;
pub mod structures;
pub mod tournament_value;
