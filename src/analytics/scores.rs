// Season score-table construction.
//
// Flattens each team's season (parallel schedule/outcome/score/margin
// arrays) into one row per scheduled game. This table is the input to every
// other descriptive view.

use serde::Serialize;

use crate::model::{GameType, Outcome, TeamSeason};

/// One scheduled game from one team's perspective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub manager: String,
    pub opponent: String,
    pub outcome: Outcome,
    pub points_for: f64,
    pub points_against: f64,
    /// Margin of victory (negative for losses).
    pub mov: f64,
    pub week: u16,
    pub game_type: GameType,
    pub year: u16,
}

/// Build score rows for one season from the provider's team data.
///
/// Week numbers are 1-based positions in the schedule arrays; weeks beyond
/// the regular-season count are postseason. Points against is derived from
/// points for and the margin. Rows are emitted only up to the shortest of
/// the parallel arrays, so a truncated upstream record degrades to fewer
/// rows rather than an error.
pub fn build_score_rows(year: u16, reg_season_count: u16, teams: &[TeamSeason]) -> Vec<ScoreRow> {
    let mut rows = Vec::new();
    for team in teams {
        let games = team
            .schedule
            .len()
            .min(team.outcomes.len())
            .min(team.scores.len())
            .min(team.mov.len());
        for i in 0..games {
            let week = (i + 1) as u16;
            rows.push(ScoreRow {
                manager: team.manager.clone(),
                opponent: team.schedule[i].clone(),
                outcome: team.outcomes[i],
                points_for: team.scores[i],
                points_against: team.scores[i] - team.mov[i],
                mov: team.mov[i],
                week,
                game_type: if week <= reg_season_count {
                    GameType::Season
                } else {
                    GameType::Postseason
                },
                year,
            });
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Rolling three-week totals
// ---------------------------------------------------------------------------

/// A three-consecutive-game scoring stretch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingScore {
    pub manager: String,
    pub year: u16,
    /// Week the stretch ends on.
    pub week: u16,
    pub points: f64,
}

/// Per-manager rolling three-game point totals over played regular-season
/// games, best stretches first.
pub fn rolling_three_week(rows: &[ScoreRow]) -> Vec<RollingScore> {
    let mut eligible: Vec<&ScoreRow> = rows
        .iter()
        .filter(|r| r.game_type == GameType::Season && r.outcome.is_played())
        .collect();
    eligible.sort_by(|a, b| {
        (a.manager.as_str(), a.year, a.week).cmp(&(b.manager.as_str(), b.year, b.week))
    });

    let mut stretches = Vec::new();
    for window in eligible.windows(3) {
        let [a, b, c] = window else { continue };
        if a.manager != c.manager || a.year != c.year {
            continue;
        }
        stretches.push(RollingScore {
            manager: c.manager.clone(),
            year: c.year,
            week: c.week,
            points: a.points_for + b.points_for + c.points_for,
        });
    }
    stretches.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stretches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn team(manager: &str, outcomes: &[Outcome], scores: &[f64], mov: &[f64]) -> TeamSeason {
        TeamSeason {
            manager: manager.into(),
            schedule: vec!["Opp".into(); outcomes.len()],
            outcomes: outcomes.to_vec(),
            scores: scores.to_vec(),
            mov: mov.to_vec(),
            acquisitions: 0,
            trades: 0,
            faab_spent: 0,
        }
    }

    #[test]
    fn rows_carry_week_numbers_and_game_types() {
        let teams = vec![team(
            "Alex",
            &[Outcome::Win, Outcome::Loss, Outcome::Win],
            &[100.0, 90.0, 110.0],
            &[10.0, -5.0, 20.0],
        )];
        let rows = build_score_rows(2023, 2, &teams);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].week, 1);
        assert_eq!(rows[0].game_type, GameType::Season);
        assert_eq!(rows[1].game_type, GameType::Season);
        assert_eq!(rows[2].week, 3);
        assert_eq!(rows[2].game_type, GameType::Postseason);
        assert_eq!(rows[2].year, 2023);
    }

    #[test]
    fn points_against_derived_from_margin() {
        let teams = vec![team("Alex", &[Outcome::Win], &[101.5], &[11.25])];
        let rows = build_score_rows(2023, 14, &teams);
        assert!((rows[0].points_against - 90.25).abs() < 1e-9);
    }

    #[test]
    fn truncated_arrays_emit_fewer_rows() {
        let mut short = team("Alex", &[Outcome::Win, Outcome::Loss], &[100.0, 90.0], &[1.0, -1.0]);
        short.scores.pop();
        let rows = build_score_rows(2023, 14, &[short]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn rolling_three_week_sums_consecutive_games() {
        let teams = vec![team(
            "Alex",
            &[Outcome::Win, Outcome::Loss, Outcome::Win, Outcome::Win],
            &[100.0, 90.0, 110.0, 120.0],
            &[1.0, -1.0, 1.0, 1.0],
        )];
        let rows = build_score_rows(2023, 14, &teams);
        let stretches = rolling_three_week(&rows);
        assert_eq!(stretches.len(), 2);
        // Best stretch first: weeks 2-4 sum 320.
        assert_eq!(stretches[0].week, 4);
        assert!((stretches[0].points - 320.0).abs() < 1e-9);
        assert!((stretches[1].points - 300.0).abs() < 1e-9);
    }

    #[test]
    fn rolling_windows_do_not_cross_managers() {
        let teams = vec![
            team("Alex", &[Outcome::Win, Outcome::Loss], &[100.0, 90.0], &[1.0, -1.0]),
            team("Bo", &[Outcome::Loss, Outcome::Win], &[80.0, 85.0], &[-1.0, 1.0]),
        ];
        let rows = build_score_rows(2023, 14, &teams);
        assert!(rolling_three_week(&rows).is_empty());
    }

    #[test]
    fn rolling_skips_unplayed_and_postseason() {
        let teams = vec![team(
            "Alex",
            &[Outcome::Win, Outcome::Win, Outcome::Win, Outcome::Unplayed],
            &[100.0, 100.0, 100.0, 0.0],
            &[1.0, 1.0, 1.0, 0.0],
        )];
        // reg_season_count 3: week 4 is postseason and unplayed anyway.
        let rows = build_score_rows(2023, 3, &teams);
        let stretches = rolling_three_week(&rows);
        assert_eq!(stretches.len(), 1);
        assert!((stretches[0].points - 300.0).abs() < 1e-9);
    }
}
