use crate::model::{
    config::EngineConfig,
    error::{EngineError, Result},
    structures::format_spec::{FinalsFormat, FormatSpec, QualifyingFormat}
};

/// Scores a tournament's structure into the grade multiplier applied to its
/// raw value. `qualifying_field` is the number of players who entered
/// qualifying; it only matters for the finals-eligibility check.
pub fn evaluate_format_grade(spec: &FormatSpec, qualifying_field: usize, config: &EngineConfig) -> Result<f64> {
    check_finals_eligibility(spec, qualifying_field, config)?;

    let grade = (qualifying_contribution(spec, config) + finals_contribution(spec, config))
        * ball_adjustment(spec.ball_count, config);

    let cap = if spec.has_finals() {
        config.format_grade.cap_with_finals
    } else {
        config.format_grade.cap_without_finals
    };

    Ok(grade.clamp(0.0, cap))
}

fn qualifying_contribution(spec: &FormatSpec, config: &EngineConfig) -> f64 {
    let qualifying = &spec.qualifying;

    config.format_grade.grade_per_game
        * qualifying.meaningful_games as f64
        * group_multiplier(qualifying.four_player_groups, qualifying.three_player_groups, config)
        * duration_bonus(spec, config)
}

fn finals_contribution(spec: &FormatSpec, config: &EngineConfig) -> f64 {
    let finals = &spec.finals;
    let format_multiplier = match finals.format {
        FinalsFormat::None => return 0.0,
        FinalsFormat::SingleElimination => config.format_grade.single_elimination_multiplier,
        FinalsFormat::MatchPlay => config.format_grade.match_play_multiplier,
        FinalsFormat::Ladder => config.format_grade.ladder_multiplier,
        FinalsFormat::BestGame => config.format_grade.best_game_multiplier
    };

    config.format_grade.grade_per_game
        * finals.meaningful_games as f64
        * group_multiplier(finals.four_player_groups, finals.three_player_groups, config)
        * format_multiplier
}

/// Four-player groups take precedence when both flags are set.
fn group_multiplier(four_player: bool, three_player: bool, config: &EngineConfig) -> f64 {
    if four_player {
        config.format_grade.four_player_group_multiplier
    } else if three_player {
        config.format_grade.three_player_group_multiplier
    } else {
        1.0
    }
}

/// Hourly bonus for unlimited qualifying: 1% per posted hour, capped, and
/// only once the duration clears the minimum-hours threshold.
fn duration_bonus(spec: &FormatSpec, config: &EngineConfig) -> f64 {
    if spec.qualifying.format != QualifyingFormat::Unlimited {
        return 1.0;
    }

    match spec.qualifying.duration_hours {
        Some(hours) if hours >= config.format_grade.unlimited_bonus_min_hours => {
            let bonus = (config.format_grade.unlimited_bonus_per_hour * hours)
                .min(config.format_grade.unlimited_bonus_max);
            1.0 + bonus
        }
        _ => 1.0
    }
}

fn ball_adjustment(ball_count: u8, config: &EngineConfig) -> f64 {
    match ball_count {
        1 => config.format_grade.one_ball_adjustment,
        2 => config.format_grade.two_ball_adjustment,
        _ => config.format_grade.three_plus_ball_adjustment
    }
}

fn check_finals_eligibility(spec: &FormatSpec, qualifying_field: usize, config: &EngineConfig) -> Result<()> {
    if !spec.has_finals() {
        return Ok(());
    }
    let Some(finalists) = spec.finals.finalist_count else {
        return Ok(());
    };

    if qualifying_field == 0 {
        return Err(EngineError::EmptyQualifyingField { finalists });
    }

    let ratio = finalists as f64 / qualifying_field as f64;
    let min = config.format_grade.finals_eligibility_min_ratio;
    let max = config.format_grade.finals_eligibility_max_ratio;
    if ratio < min || ratio > max {
        return Err(EngineError::FinalsEligibility { ratio, min, max });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::model::structures::format_spec::{FinalsSpec, QualifyingSpec};

    fn spec(qualifying_games: u32, finals_format: FinalsFormat, finals_games: u32) -> FormatSpec {
        FormatSpec {
            qualifying: QualifyingSpec {
                format: QualifyingFormat::Limited,
                meaningful_games: qualifying_games,
                duration_hours: None,
                four_player_groups: false,
                three_player_groups: false
            },
            finals: FinalsSpec {
                format: finals_format,
                meaningful_games: finals_games,
                finalist_count: None,
                four_player_groups: false,
                three_player_groups: false
            },
            ball_count: 3
        }
    }

    #[test]
    fn limited_qualifying_with_grouped_match_play_finals() {
        let config = EngineConfig::default();
        let mut spec = spec(5, FinalsFormat::MatchPlay, 8);
        spec.finals.four_player_groups = true;

        let grade = evaluate_format_grade(&spec, 20, &config).unwrap();

        // 0.04 * 5 + 0.04 * 8 * 2.0
        assert_abs_diff_eq!(grade, 0.84, epsilon = 1e-12);
    }

    #[test]
    fn no_finals_contribution_without_finals() {
        let config = EngineConfig::default();
        let grade = evaluate_format_grade(&spec(10, FinalsFormat::None, 99), 16, &config).unwrap();

        assert_abs_diff_eq!(grade, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn zero_meaningful_games_grades_zero() {
        let config = EngineConfig::default();
        let grade = evaluate_format_grade(&spec(0, FinalsFormat::None, 0), 8, &config).unwrap();

        assert_eq!(grade, 0.0);
    }

    #[test]
    fn four_player_groups_take_precedence_over_three() {
        let config = EngineConfig::default();
        let mut spec = spec(5, FinalsFormat::None, 0);
        spec.qualifying.four_player_groups = true;
        spec.qualifying.three_player_groups = true;

        let grade = evaluate_format_grade(&spec, 12, &config).unwrap();
        assert_abs_diff_eq!(grade, 0.04 * 5.0 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn unlimited_duration_bonus_gated_and_capped() {
        let config = EngineConfig::default();
        let mut spec = spec(10, FinalsFormat::None, 0);
        spec.qualifying.format = QualifyingFormat::Unlimited;

        // Below the minimum-hours threshold: no bonus.
        spec.qualifying.duration_hours = Some(8.0);
        let short = evaluate_format_grade(&spec, 30, &config).unwrap();
        assert_abs_diff_eq!(short, 0.4, epsilon = 1e-12);

        // 15 hours: 15% bonus.
        spec.qualifying.duration_hours = Some(15.0);
        let mid = evaluate_format_grade(&spec, 30, &config).unwrap();
        assert_abs_diff_eq!(mid, 0.4 * 1.15, epsilon = 1e-12);

        // 40 hours: capped at 20%.
        spec.qualifying.duration_hours = Some(40.0);
        let long = evaluate_format_grade(&spec, 30, &config).unwrap();
        assert_abs_diff_eq!(long, 0.4 * 1.20, epsilon = 1e-12);
    }

    #[test]
    fn limited_qualifying_ignores_duration() {
        let config = EngineConfig::default();
        let mut spec = spec(10, FinalsFormat::None, 0);
        spec.qualifying.duration_hours = Some(40.0);

        let grade = evaluate_format_grade(&spec, 30, &config).unwrap();
        assert_abs_diff_eq!(grade, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn ball_count_adjustments() {
        let config = EngineConfig::default();
        let mut spec = spec(10, FinalsFormat::None, 0);

        spec.ball_count = 1;
        let one = evaluate_format_grade(&spec, 20, &config).unwrap();
        spec.ball_count = 2;
        let two = evaluate_format_grade(&spec, 20, &config).unwrap();
        spec.ball_count = 5;
        let many = evaluate_format_grade(&spec, 20, &config).unwrap();

        assert_abs_diff_eq!(one, 0.4 * 0.33, epsilon = 1e-12);
        assert_abs_diff_eq!(two, 0.4 * 0.66, epsilon = 1e-12);
        assert_abs_diff_eq!(many, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn grade_clamps_to_the_applicable_cap() {
        let config = EngineConfig::default();

        let huge_qualifying = spec(200, FinalsFormat::None, 0);
        let without = evaluate_format_grade(&huge_qualifying, 50, &config).unwrap();
        assert_abs_diff_eq!(without, config.format_grade.cap_without_finals);

        let huge_both = spec(200, FinalsFormat::MatchPlay, 200);
        let with = evaluate_format_grade(&huge_both, 50, &config).unwrap();
        assert_abs_diff_eq!(with, config.format_grade.cap_with_finals);
    }

    #[test]
    fn finals_eligibility_out_of_range_is_an_error() {
        let config = EngineConfig::default();
        let mut spec = spec(5, FinalsFormat::SingleElimination, 4);
        spec.finals.finalist_count = Some(30);

        let result = evaluate_format_grade(&spec, 40, &config);
        assert!(matches!(result, Err(EngineError::FinalsEligibility { .. })));

        // In range: 8 of 40 is 20%.
        spec.finals.finalist_count = Some(8);
        assert!(evaluate_format_grade(&spec, 40, &config).is_ok());
    }

    #[test]
    fn finals_with_empty_qualifying_field_is_an_error() {
        let config = EngineConfig::default();
        let mut spec = spec(5, FinalsFormat::SingleElimination, 4);
        spec.finals.finalist_count = Some(8);

        let result = evaluate_format_grade(&spec, 0, &config);
        assert!(matches!(result, Err(EngineError::EmptyQualifyingField { finalists: 8 })));
    }
}
