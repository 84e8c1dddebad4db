use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{
    constants,
    error::{EngineError, ValidationFailure}
};

/// Base value: points earned purely from rated attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseValueConfig {
    pub points_per_player: f64,
    pub value_cap: f64
}

/// Value adjustments from the strength of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAdjustmentConfig {
    pub rating_top_n: usize,
    pub rating_coefficient: f64,
    pub rating_offset: f64,
    pub min_effective_rating: f64,
    pub rating_cap: f64,
    pub ranking_top_n: usize,
    pub ranking_coefficient: f64,
    pub ranking_offset: f64,
    pub ranking_cap: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatGradeConfig {
    pub grade_per_game: f64,
    pub four_player_group_multiplier: f64,
    pub three_player_group_multiplier: f64,
    pub unlimited_bonus_min_hours: f64,
    pub unlimited_bonus_per_hour: f64,
    pub unlimited_bonus_max: f64,
    pub single_elimination_multiplier: f64,
    pub match_play_multiplier: f64,
    pub ladder_multiplier: f64,
    pub best_game_multiplier: f64,
    pub one_ball_adjustment: f64,
    pub two_ball_adjustment: f64,
    pub three_plus_ball_adjustment: f64,
    pub cap_with_finals: f64,
    pub cap_without_finals: f64,
    pub finals_eligibility_min_ratio: f64,
    pub finals_eligibility_max_ratio: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationConfig {
    /// Indexed by CertificationTier discriminant.
    pub boosters: [f64; 4]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub flat_fraction: f64,
    /// Derived: always 1 - flat_fraction. Never set directly.
    pub shaped_fraction: f64,
    pub position_exponent: f64,
    pub value_exponent: f64,
    /// Derived: base value cap / points per player. Never set directly.
    pub dynamic_player_cap: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDecayConfig {
    /// Weight per whole year of age; age >= weights.len() years is expired.
    pub weights: [f64; 3],
    pub days_per_year: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// How many of a player's best decayed events count toward the score.
    pub counted_events: usize
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    pub default_rating: f64,
    pub min_uncertainty: f64,
    pub max_uncertainty: f64,
    pub provisional_event_threshold: u32,
    pub uncertainty_decay_per_day: f64,
    /// How far (in finishing-list slots) the match simulator looks for
    /// opponents on either side of a player.
    pub simulation_range: usize
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub fraction_sum_epsilon: f64
}

/// The complete, validated engine configuration. Treated as an immutable
/// snapshot: formula functions borrow it, the store swaps it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub base_value: BaseValueConfig,
    pub value_adjustment: ValueAdjustmentConfig,
    pub format_grade: FormatGradeConfig,
    pub certification: CertificationConfig,
    pub distribution: DistributionConfig,
    pub point_decay: PointDecayConfig,
    pub ranking: RankingConfig,
    pub rating: RatingConfig,
    pub validation: ValidationConfig
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut config = EngineConfig {
            base_value: BaseValueConfig {
                points_per_player: constants::POINTS_PER_PLAYER,
                value_cap: constants::BASE_VALUE_CAP
            },
            value_adjustment: ValueAdjustmentConfig {
                rating_top_n: constants::RATING_ADJUSTMENT_TOP_N,
                rating_coefficient: constants::RATING_ADJUSTMENT_COEFFICIENT,
                rating_offset: constants::RATING_ADJUSTMENT_OFFSET,
                min_effective_rating: constants::MIN_EFFECTIVE_RATING,
                rating_cap: constants::RATING_ADJUSTMENT_CAP,
                ranking_top_n: constants::RANKING_ADJUSTMENT_TOP_N,
                ranking_coefficient: constants::RANKING_ADJUSTMENT_COEFFICIENT,
                ranking_offset: constants::RANKING_ADJUSTMENT_OFFSET,
                ranking_cap: constants::RANKING_ADJUSTMENT_CAP
            },
            format_grade: FormatGradeConfig {
                grade_per_game: constants::GRADE_PER_MEANINGFUL_GAME,
                four_player_group_multiplier: constants::FOUR_PLAYER_GROUP_MULTIPLIER,
                three_player_group_multiplier: constants::THREE_PLAYER_GROUP_MULTIPLIER,
                unlimited_bonus_min_hours: constants::UNLIMITED_BONUS_MIN_HOURS,
                unlimited_bonus_per_hour: constants::UNLIMITED_BONUS_PER_HOUR,
                unlimited_bonus_max: constants::UNLIMITED_BONUS_MAX,
                single_elimination_multiplier: constants::SINGLE_ELIMINATION_MULTIPLIER,
                match_play_multiplier: constants::MATCH_PLAY_MULTIPLIER,
                ladder_multiplier: constants::LADDER_MULTIPLIER,
                best_game_multiplier: constants::BEST_GAME_MULTIPLIER,
                one_ball_adjustment: constants::ONE_BALL_ADJUSTMENT,
                two_ball_adjustment: constants::TWO_BALL_ADJUSTMENT,
                three_plus_ball_adjustment: constants::THREE_PLUS_BALL_ADJUSTMENT,
                cap_with_finals: constants::GRADE_CAP_WITH_FINALS,
                cap_without_finals: constants::GRADE_CAP_WITHOUT_FINALS,
                finals_eligibility_min_ratio: constants::FINALS_ELIGIBILITY_MIN_RATIO,
                finals_eligibility_max_ratio: constants::FINALS_ELIGIBILITY_MAX_RATIO
            },
            certification: CertificationConfig {
                boosters: constants::CERTIFICATION_BOOSTERS
            },
            distribution: DistributionConfig {
                flat_fraction: constants::FLAT_FRACTION,
                shaped_fraction: 0.0,
                position_exponent: constants::POSITION_EXPONENT,
                value_exponent: constants::VALUE_EXPONENT,
                dynamic_player_cap: 0.0
            },
            point_decay: PointDecayConfig {
                weights: constants::DECAY_WEIGHTS,
                days_per_year: constants::DAYS_PER_YEAR
            },
            ranking: RankingConfig {
                counted_events: constants::COUNTED_EVENTS
            },
            rating: RatingConfig {
                default_rating: constants::DEFAULT_RATING,
                min_uncertainty: constants::MIN_UNCERTAINTY,
                max_uncertainty: constants::MAX_UNCERTAINTY,
                provisional_event_threshold: constants::PROVISIONAL_EVENT_THRESHOLD,
                uncertainty_decay_per_day: constants::UNCERTAINTY_DECAY_PER_DAY,
                simulation_range: constants::SIMULATION_RANGE
            },
            validation: ValidationConfig {
                fraction_sum_epsilon: constants::FRACTION_SUM_EPSILON
            }
        };

        config.derive();
        config
    }
}

impl EngineConfig {
    /// Recomputes every derived field from its declared sources. The single
    /// place this derivation lives; call sites never re-derive on their own.
    pub fn derive(&mut self) {
        self.distribution.shaped_fraction = 1.0 - self.distribution.flat_fraction;
        self.distribution.dynamic_player_cap = if self.base_value.points_per_player > 0.0 {
            self.base_value.value_cap / self.base_value.points_per_player
        } else {
            0.0
        };
    }

    /// Checks every cross-field invariant and returns the full batch of
    /// violations. Empty means the configuration is sound.
    pub fn validate(&self) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        let eps = self.validation.fraction_sum_epsilon;

        if self.base_value.points_per_player <= 0.0 {
            failures.push(ValidationFailure::new(
                "base_value.points_per_player",
                "must be strictly positive",
                constants::POINTS_PER_PLAYER
            ));
        }
        if self.base_value.value_cap <= 0.0 {
            failures.push(ValidationFailure::new(
                "base_value.value_cap",
                "must be strictly positive",
                constants::BASE_VALUE_CAP
            ));
        }

        if self.value_adjustment.rating_cap <= 0.0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.rating_cap",
                "must be strictly positive",
                constants::RATING_ADJUSTMENT_CAP
            ));
        }
        if self.value_adjustment.ranking_cap <= 0.0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.ranking_cap",
                "must be strictly positive",
                constants::RANKING_ADJUSTMENT_CAP
            ));
        }
        if self.value_adjustment.rating_coefficient <= 0.0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.rating_coefficient",
                "must be strictly positive",
                constants::RATING_ADJUSTMENT_COEFFICIENT
            ));
        }
        if self.value_adjustment.ranking_coefficient >= 0.0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.ranking_coefficient",
                "must be negative so better rankings earn more",
                constants::RANKING_ADJUSTMENT_COEFFICIENT
            ));
        }
        if self.value_adjustment.rating_top_n == 0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.rating_top_n",
                "must consider at least one player",
                constants::RATING_ADJUSTMENT_TOP_N as f64
            ));
        }
        if self.value_adjustment.ranking_top_n == 0 {
            failures.push(ValidationFailure::new(
                "value_adjustment.ranking_top_n",
                "must consider at least one player",
                constants::RANKING_ADJUSTMENT_TOP_N as f64
            ));
        }

        if !(0.0..=1.0).contains(&self.distribution.flat_fraction) {
            failures.push(ValidationFailure::new(
                "distribution.flat_fraction",
                "must lie in [0, 1]",
                constants::FLAT_FRACTION
            ));
        }
        let fraction_sum = self.distribution.flat_fraction + self.distribution.shaped_fraction;
        if (fraction_sum - 1.0).abs() > eps {
            failures.push(ValidationFailure::new(
                "distribution.shaped_fraction",
                format!("flat and shaped fractions sum to {fraction_sum}, expected 1"),
                1.0 - self.distribution.flat_fraction
            ));
        }
        if self.base_value.points_per_player > 0.0 {
            let expected_cap = self.base_value.value_cap / self.base_value.points_per_player;
            if (self.distribution.dynamic_player_cap - expected_cap).abs() > eps {
                failures.push(ValidationFailure::new(
                    "distribution.dynamic_player_cap",
                    "must equal value_cap / points_per_player",
                    expected_cap
                ));
            }
        }
        if self.distribution.position_exponent <= 0.0 {
            failures.push(ValidationFailure::new(
                "distribution.position_exponent",
                "must be strictly positive",
                constants::POSITION_EXPONENT
            ));
        }
        if self.distribution.value_exponent <= 0.0 {
            failures.push(ValidationFailure::new(
                "distribution.value_exponent",
                "must be strictly positive",
                constants::VALUE_EXPONENT
            ));
        }

        if self.format_grade.grade_per_game <= 0.0 {
            failures.push(ValidationFailure::new(
                "format_grade.grade_per_game",
                "must be strictly positive",
                constants::GRADE_PER_MEANINGFUL_GAME
            ));
        }
        if self.format_grade.cap_with_finals <= self.format_grade.cap_without_finals {
            failures.push(ValidationFailure::new(
                "format_grade.cap_with_finals",
                "must exceed cap_without_finals",
                self.format_grade.cap_without_finals * 2.0
            ));
        }
        if self.format_grade.finals_eligibility_min_ratio >= self.format_grade.finals_eligibility_max_ratio {
            failures.push(ValidationFailure::new(
                "format_grade.finals_eligibility_min_ratio",
                "must be below finals_eligibility_max_ratio",
                constants::FINALS_ELIGIBILITY_MIN_RATIO
            ));
        }
        for (name, ratio) in [
            (
                "format_grade.finals_eligibility_min_ratio",
                self.format_grade.finals_eligibility_min_ratio
            ),
            (
                "format_grade.finals_eligibility_max_ratio",
                self.format_grade.finals_eligibility_max_ratio
            )
        ] {
            if !(0.0 < ratio && ratio <= 1.0) {
                failures.push(ValidationFailure::new(name, "must lie in (0, 1]", 0.5));
            }
        }

        let boosters = &self.certification.boosters;
        if (boosters[0] - 1.0).abs() > eps {
            failures.push(ValidationFailure::new(
                "certification.boosters[0]",
                "first tier booster must be exactly 1.0",
                1.0
            ));
        }
        for i in 1..boosters.len() {
            if boosters[i] < boosters[i - 1] {
                failures.push(ValidationFailure::new(
                    &format!("certification.boosters[{i}]"),
                    "boosters must be non-decreasing across tiers",
                    boosters[i - 1]
                ));
            }
        }

        let weights = &self.point_decay.weights;
        if (weights[0] - 1.0).abs() > eps {
            failures.push(ValidationFailure::new(
                "point_decay.weights[0]",
                "first-year weight must be exactly 1.0",
                1.0
            ));
        }
        for i in 1..weights.len() {
            if weights[i] > weights[i - 1] {
                failures.push(ValidationFailure::new(
                    &format!("point_decay.weights[{i}]"),
                    "decay weights must be non-increasing with age",
                    weights[i - 1]
                ));
            }
        }
        if weights.iter().any(|w| *w < 0.0) {
            failures.push(ValidationFailure::new(
                "point_decay.weights",
                "decay weights must be non-negative",
                0.0
            ));
        }
        if self.point_decay.days_per_year <= 0.0 {
            failures.push(ValidationFailure::new(
                "point_decay.days_per_year",
                "must be strictly positive",
                constants::DAYS_PER_YEAR
            ));
        }

        if self.ranking.counted_events == 0 {
            failures.push(ValidationFailure::new(
                "ranking.counted_events",
                "must count at least one event",
                constants::COUNTED_EVENTS as f64
            ));
        }

        if self.rating.default_rating <= 0.0 {
            failures.push(ValidationFailure::new(
                "rating.default_rating",
                "must be strictly positive",
                constants::DEFAULT_RATING
            ));
        }
        if self.rating.min_uncertainty >= self.rating.max_uncertainty {
            failures.push(ValidationFailure::new(
                "rating.min_uncertainty",
                "must be below max_uncertainty",
                constants::MIN_UNCERTAINTY
            ));
        }
        if self.rating.min_uncertainty <= 0.0 {
            failures.push(ValidationFailure::new(
                "rating.min_uncertainty",
                "must be strictly positive",
                constants::MIN_UNCERTAINTY
            ));
        }
        if self.rating.provisional_event_threshold == 0 {
            failures.push(ValidationFailure::new(
                "rating.provisional_event_threshold",
                "must require at least one event",
                constants::PROVISIONAL_EVENT_THRESHOLD as f64
            ));
        }
        if self.rating.uncertainty_decay_per_day < 0.0 {
            failures.push(ValidationFailure::new(
                "rating.uncertainty_decay_per_day",
                "must be non-negative",
                constants::UNCERTAINTY_DECAY_PER_DAY
            ));
        }

        failures
    }
}

macro_rules! merge_fields {
    ($overlay:expr, $target:expr, [$($field:ident),+ $(,)?]) => {
        $( if let Some(v) = $overlay.$field { $target.$field = v; } )+
    };
}

/// Partial configuration overlay. Every field is optional; absent fields
/// keep their active value. Derived fields are deliberately missing here
/// so they can never be set independently of their sources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfigOverlay {
    pub base_value: BaseValueOverlay,
    pub value_adjustment: ValueAdjustmentOverlay,
    pub format_grade: FormatGradeOverlay,
    pub certification: CertificationOverlay,
    pub distribution: DistributionOverlay,
    pub point_decay: PointDecayOverlay,
    pub ranking: RankingOverlay,
    pub rating: RatingOverlay
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BaseValueOverlay {
    pub points_per_player: Option<f64>,
    pub value_cap: Option<f64>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValueAdjustmentOverlay {
    pub rating_top_n: Option<usize>,
    pub rating_coefficient: Option<f64>,
    pub rating_offset: Option<f64>,
    pub min_effective_rating: Option<f64>,
    pub rating_cap: Option<f64>,
    pub ranking_top_n: Option<usize>,
    pub ranking_coefficient: Option<f64>,
    pub ranking_offset: Option<f64>,
    pub ranking_cap: Option<f64>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormatGradeOverlay {
    pub grade_per_game: Option<f64>,
    pub four_player_group_multiplier: Option<f64>,
    pub three_player_group_multiplier: Option<f64>,
    pub unlimited_bonus_min_hours: Option<f64>,
    pub unlimited_bonus_per_hour: Option<f64>,
    pub unlimited_bonus_max: Option<f64>,
    pub single_elimination_multiplier: Option<f64>,
    pub match_play_multiplier: Option<f64>,
    pub ladder_multiplier: Option<f64>,
    pub best_game_multiplier: Option<f64>,
    pub one_ball_adjustment: Option<f64>,
    pub two_ball_adjustment: Option<f64>,
    pub three_plus_ball_adjustment: Option<f64>,
    pub cap_with_finals: Option<f64>,
    pub cap_without_finals: Option<f64>,
    pub finals_eligibility_min_ratio: Option<f64>,
    pub finals_eligibility_max_ratio: Option<f64>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CertificationOverlay {
    pub boosters: Option<[f64; 4]>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DistributionOverlay {
    pub flat_fraction: Option<f64>,
    pub position_exponent: Option<f64>,
    pub value_exponent: Option<f64>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointDecayOverlay {
    pub weights: Option<[f64; 3]>,
    pub days_per_year: Option<f64>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingOverlay {
    pub counted_events: Option<usize>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RatingOverlay {
    pub default_rating: Option<f64>,
    pub min_uncertainty: Option<f64>,
    pub max_uncertainty: Option<f64>,
    pub provisional_event_threshold: Option<u32>,
    pub uncertainty_decay_per_day: Option<f64>,
    pub simulation_range: Option<usize>
}

impl EngineConfigOverlay {
    fn apply(&self, config: &mut EngineConfig) {
        merge_fields!(self.base_value, config.base_value, [points_per_player, value_cap]);
        merge_fields!(
            self.value_adjustment,
            config.value_adjustment,
            [
                rating_top_n,
                rating_coefficient,
                rating_offset,
                min_effective_rating,
                rating_cap,
                ranking_top_n,
                ranking_coefficient,
                ranking_offset,
                ranking_cap
            ]
        );
        merge_fields!(
            self.format_grade,
            config.format_grade,
            [
                grade_per_game,
                four_player_group_multiplier,
                three_player_group_multiplier,
                unlimited_bonus_min_hours,
                unlimited_bonus_per_hour,
                unlimited_bonus_max,
                single_elimination_multiplier,
                match_play_multiplier,
                ladder_multiplier,
                best_game_multiplier,
                one_ball_adjustment,
                two_ball_adjustment,
                three_plus_ball_adjustment,
                cap_with_finals,
                cap_without_finals,
                finals_eligibility_min_ratio,
                finals_eligibility_max_ratio
            ]
        );
        merge_fields!(self.certification, config.certification, [boosters]);
        merge_fields!(
            self.distribution,
            config.distribution,
            [flat_fraction, position_exponent, value_exponent]
        );
        merge_fields!(self.point_decay, config.point_decay, [weights, days_per_year]);
        merge_fields!(self.ranking, config.ranking, [counted_events]);
        merge_fields!(
            self.rating,
            config.rating,
            [
                default_rating,
                min_uncertainty,
                max_uncertainty,
                provisional_event_threshold,
                uncertainty_decay_per_day,
                simulation_range
            ]
        );
    }
}

/// Process-wide holder of the active configuration. Readers clone an `Arc`
/// snapshot; `resolve` swaps the whole snapshot under the write lock, so a
/// reader can never observe a partially-applied overlay.
pub struct ConfigStore {
    active: RwLock<Arc<EngineConfig>>
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> ConfigStore {
        ConfigStore {
            active: RwLock::new(Arc::new(EngineConfig::default()))
        }
    }

    /// The active configuration snapshot.
    pub fn current(&self) -> Arc<EngineConfig> {
        self.active.read().expect("config lock poisoned").clone()
    }

    /// Deep-merges `overlay` onto the active configuration, re-derives
    /// dependent fields, and validates the result as a batch. On success the
    /// new snapshot is installed atomically and returned; on failure the
    /// full violation list is returned and the prior configuration stays
    /// active. There is no partial apply.
    ///
    /// The whole merge-derive-validate-install sequence runs under the
    /// write lock: concurrent resolves serialize, each merging onto the
    /// other's installed result rather than onto a stale snapshot.
    pub fn resolve(&self, overlay: &EngineConfigOverlay) -> std::result::Result<Arc<EngineConfig>, EngineError> {
        let mut active = self.active.write().expect("config lock poisoned");

        let mut candidate = (**active).clone();
        overlay.apply(&mut candidate);
        candidate.derive();

        let failures = candidate.validate();
        if !failures.is_empty() {
            warn!(violations = failures.len(), "rejected configuration overlay");
            return Err(failures.into());
        }

        let snapshot = Arc::new(candidate);
        *active = snapshot.clone();
        debug!("installed new engine configuration");

        Ok(snapshot)
    }

    /// Restores the built-in defaults.
    pub fn reset(&self) {
        *self.active.write().expect("config lock poisoned") = Arc::new(EngineConfig::default());
    }
}

lazy_static! {
    /// The store every formula call reads through unless handed an explicit
    /// snapshot.
    pub static ref CONFIG: ConfigStore = ConfigStore::new();
}
