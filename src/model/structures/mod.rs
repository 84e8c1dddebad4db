pub mod certification_tier;
pub mod finishing_result;
pub mod format_spec;
pub mod match_outcome;
pub mod placement;
pub mod player;
pub mod rating_state;
