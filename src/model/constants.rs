// Engine default constants. These seed the default EngineConfig; runtime
// overrides go through ConfigStore::resolve, never through edits here.

// Base value
pub const POINTS_PER_PLAYER: f64 = 0.5;
pub const BASE_VALUE_CAP: f64 = 250.0;

// Value adjustments
pub const RATING_ADJUSTMENT_TOP_N: usize = 10;
pub const RATING_ADJUSTMENT_COEFFICIENT: f64 = 0.001;
pub const RATING_ADJUSTMENT_OFFSET: f64 = 1.3;
// Ratings below this contribute nothing to the rating adjustment.
pub const MIN_EFFECTIVE_RATING: f64 = 1300.0;
pub const RATING_ADJUSTMENT_CAP: f64 = 25.0;
pub const RANKING_ADJUSTMENT_TOP_N: usize = 10;
pub const RANKING_ADJUSTMENT_COEFFICIENT: f64 = -0.5;
pub const RANKING_ADJUSTMENT_OFFSET: f64 = 4.0;
pub const RANKING_ADJUSTMENT_CAP: f64 = 25.0;

// Format grade
pub const GRADE_PER_MEANINGFUL_GAME: f64 = 0.04;
pub const FOUR_PLAYER_GROUP_MULTIPLIER: f64 = 2.0;
pub const THREE_PLAYER_GROUP_MULTIPLIER: f64 = 1.5;
pub const UNLIMITED_BONUS_MIN_HOURS: f64 = 10.0;
pub const UNLIMITED_BONUS_PER_HOUR: f64 = 0.01;
pub const UNLIMITED_BONUS_MAX: f64 = 0.20;
pub const SINGLE_ELIMINATION_MULTIPLIER: f64 = 1.0;
pub const MATCH_PLAY_MULTIPLIER: f64 = 1.0;
pub const LADDER_MULTIPLIER: f64 = 0.75;
pub const BEST_GAME_MULTIPLIER: f64 = 0.5;
pub const ONE_BALL_ADJUSTMENT: f64 = 0.33;
pub const TWO_BALL_ADJUSTMENT: f64 = 0.66;
pub const THREE_PLUS_BALL_ADJUSTMENT: f64 = 1.0;
pub const GRADE_CAP_WITH_FINALS: f64 = 2.0;
pub const GRADE_CAP_WITHOUT_FINALS: f64 = 1.0;
pub const FINALS_ELIGIBILITY_MIN_RATIO: f64 = 0.10;
pub const FINALS_ELIGIBILITY_MAX_RATIO: f64 = 0.50;

// Certification boosters, indexed by CertificationTier discriminant.
// Non-decreasing, first tier exactly 1.0.
pub const CERTIFICATION_BOOSTERS: [f64; 4] = [1.0, 1.1, 1.25, 1.5];

// Point distribution. The shaped fraction is derived as 1 - flat_fraction.
pub const FLAT_FRACTION: f64 = 0.1;
pub const POSITION_EXPONENT: f64 = 1.5;
pub const VALUE_EXPONENT: f64 = 3.0;

// Time decay, banded by whole years of age. Age >= 3 years is expired.
pub const DECAY_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.25];
pub const DAYS_PER_YEAR: f64 = 365.25;

// Ranking aggregation
pub const COUNTED_EVENTS: usize = 15;

// Rating engine
pub const DEFAULT_RATING: f64 = 1500.0;
pub const MIN_UNCERTAINTY: f64 = 50.0;
pub const MAX_UNCERTAINTY: f64 = 350.0;
pub const PROVISIONAL_EVENT_THRESHOLD: u32 = 5;
pub const UNCERTAINTY_DECAY_PER_DAY: f64 = 0.25;
pub const SIMULATION_RANGE: usize = 2;

// Validation
pub const FRACTION_SUM_EPSILON: f64 = 1e-9;
