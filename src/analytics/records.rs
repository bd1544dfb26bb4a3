// All-time record tables: career records, top scores, era-adjusted PPG,
// streaks, blowouts, shootouts, and championship/last-place counts.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analytics::scores::ScoreRow;
use crate::model::{GameType, Outcome};

fn by_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Career records
// ---------------------------------------------------------------------------

/// One manager's career record over a set of game types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerRecord {
    pub manager: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_points: f64,
    /// Winning percentage with ties counted as half a win, 0-100.
    pub win_pct: f64,
}

impl ManagerRecord {
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Career records per manager over played games of the given types, sorted
/// by winning percentage descending.
pub fn all_time_records(rows: &[ScoreRow], game_types: &[GameType]) -> Vec<ManagerRecord> {
    let mut tallies: HashMap<String, (u32, u32, u32, f64)> = HashMap::new();
    for row in rows {
        if !row.outcome.is_played() || !game_types.contains(&row.game_type) {
            continue;
        }
        let entry = tallies.entry(row.manager.clone()).or_default();
        match row.outcome {
            Outcome::Win => entry.0 += 1,
            Outcome::Loss => entry.1 += 1,
            Outcome::Tie => entry.2 += 1,
            Outcome::Unplayed => {}
        }
        entry.3 += row.points_for;
    }

    let mut records: Vec<ManagerRecord> = tallies
        .into_iter()
        .map(|(manager, (wins, losses, ties, total_points))| {
            let games = wins + losses + ties;
            let win_pct = if games == 0 {
                0.0
            } else {
                (wins as f64 + 0.5 * ties as f64) / games as f64 * 100.0
            };
            ManagerRecord {
                manager,
                wins,
                losses,
                ties,
                total_points,
                win_pct,
            }
        })
        .collect();
    records.sort_by(|a, b| by_f64_desc(a.win_pct, b.win_pct).then_with(|| a.manager.cmp(&b.manager)));
    records
}

// ---------------------------------------------------------------------------
// Weekly score leaderboards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyScore {
    pub manager: String,
    pub year: u16,
    pub week: u16,
    pub points: f64,
}

/// The `limit` highest (or lowest) single-week scores for a game type.
pub fn top_weekly_scores(
    rows: &[ScoreRow],
    game_type: GameType,
    limit: usize,
    lowest: bool,
) -> Vec<WeeklyScore> {
    let mut scores: Vec<WeeklyScore> = rows
        .iter()
        .filter(|r| r.outcome.is_played() && r.game_type == game_type)
        .map(|r| WeeklyScore {
            manager: r.manager.clone(),
            year: r.year,
            week: r.week,
            points: r.points_for,
        })
        .collect();
    scores.sort_by(|a, b| {
        if lowest {
            by_f64_desc(b.points, a.points)
        } else {
            by_f64_desc(a.points, b.points)
        }
    });
    scores.truncate(limit);
    scores
}

// ---------------------------------------------------------------------------
// Era-adjusted points per game
// ---------------------------------------------------------------------------

/// A manager-season PPG re-centered against its year's league average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedPpg {
    pub manager: String,
    pub year: u16,
    pub ppg: f64,
    /// (manager-year PPG - year PPG) + all-time PPG. Comparable across
    /// scoring eras.
    pub adjusted_ppg: f64,
}

/// Best manager-seasons by era-adjusted PPG.
pub fn adjusted_ppg(rows: &[ScoreRow], game_type: GameType, limit: usize) -> Vec<AdjustedPpg> {
    let played: Vec<&ScoreRow> = rows
        .iter()
        .filter(|r| r.outcome.is_played() && r.game_type == game_type)
        .collect();
    if played.is_empty() {
        return Vec::new();
    }

    let all_time_ppg =
        played.iter().map(|r| r.points_for).sum::<f64>() / played.len() as f64;

    let mut year_totals: HashMap<u16, (f64, u32)> = HashMap::new();
    let mut manager_year_totals: HashMap<(String, u16), (f64, u32)> = HashMap::new();
    for row in &played {
        let y = year_totals.entry(row.year).or_default();
        y.0 += row.points_for;
        y.1 += 1;
        let my = manager_year_totals
            .entry((row.manager.clone(), row.year))
            .or_default();
        my.0 += row.points_for;
        my.1 += 1;
    }

    let mut entries: Vec<AdjustedPpg> = manager_year_totals
        .into_iter()
        .map(|((manager, year), (points, games))| {
            let ppg = points / games as f64;
            let (year_points, year_games) = year_totals[&year];
            let year_ppg = year_points / year_games as f64;
            AdjustedPpg {
                manager,
                year,
                ppg,
                adjusted_ppg: (ppg - year_ppg) + all_time_ppg,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        by_f64_desc(a.adjusted_ppg, b.adjusted_ppg)
            .then_with(|| a.manager.cmp(&b.manager))
            .then_with(|| a.year.cmp(&b.year))
    });
    entries.truncate(limit);
    entries
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakEntry {
    pub manager: String,
    /// "2019" or "2019-2020" when the streak crossed seasons.
    pub span: String,
    pub length: u32,
}

/// Longest runs of `outcome` per manager across played games, longest first.
/// Streaks continue across season boundaries but never across managers.
pub fn longest_streaks(rows: &[ScoreRow], outcome: Outcome, limit: usize) -> Vec<StreakEntry> {
    let mut played: Vec<&ScoreRow> = rows.iter().filter(|r| r.outcome.is_played()).collect();
    played.sort_by(|a, b| {
        (a.manager.as_str(), a.year, a.week).cmp(&(b.manager.as_str(), b.year, b.week))
    });

    let mut streaks: Vec<StreakEntry> = Vec::new();
    let mut run: Option<(String, u16, u16, u32)> = None; // manager, first year, last year, length

    let mut flush = |run: &mut Option<(String, u16, u16, u32)>, streaks: &mut Vec<StreakEntry>| {
        if let Some((manager, first, last, length)) = run.take() {
            let span = if first == last {
                first.to_string()
            } else {
                format!("{first}-{last}")
            };
            streaks.push(StreakEntry { manager, span, length });
        }
    };

    for row in &played {
        let continues = matches!(
            &run,
            Some((manager, _, _, _)) if *manager == row.manager
        ) && row.outcome == outcome;

        if continues {
            if let Some(r) = run.as_mut() {
                r.2 = row.year;
                r.3 += 1;
            }
        } else {
            flush(&mut run, &mut streaks);
            if row.outcome == outcome {
                run = Some((row.manager.clone(), row.year, row.year, 1));
            }
        }
    }
    flush(&mut run, &mut streaks);

    streaks.sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.manager.cmp(&b.manager)));
    streaks.truncate(limit);
    streaks
}

// ---------------------------------------------------------------------------
// Blowouts and shootouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginEntry {
    pub winner: String,
    pub loser: String,
    pub year: u16,
    pub score: String,
    pub margin: f64,
}

/// Largest regular-season margins of victory.
pub fn largest_margins(rows: &[ScoreRow], limit: usize) -> Vec<MarginEntry> {
    let mut wins: Vec<&ScoreRow> = rows
        .iter()
        .filter(|r| r.outcome == Outcome::Win && r.game_type == GameType::Season)
        .collect();
    wins.sort_by(|a, b| by_f64_desc(a.mov, b.mov));
    wins.iter()
        .take(limit)
        .map(|r| MarginEntry {
            winner: r.manager.clone(),
            loser: r.opponent.clone(),
            year: r.year,
            score: format!("{}-{}", r.points_for, r.points_against),
            margin: r.mov,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootoutEntry {
    pub winner: String,
    pub loser: String,
    pub year: u16,
    pub score: String,
    pub combined: f64,
}

/// Highest combined-score regular-season games.
pub fn highest_scoring_games(rows: &[ScoreRow], limit: usize) -> Vec<ShootoutEntry> {
    let mut wins: Vec<&ScoreRow> = rows
        .iter()
        .filter(|r| r.outcome == Outcome::Win && r.game_type == GameType::Season)
        .collect();
    wins.sort_by(|a, b| {
        by_f64_desc(a.points_for + a.points_against, b.points_for + b.points_against)
    });
    wins.iter()
        .take(limit)
        .map(|r| ShootoutEntry {
            winner: r.manager.clone(),
            loser: r.opponent.clone(),
            year: r.year,
            score: format!("{}-{}", r.points_for, r.points_against),
            combined: r.points_for + r.points_against,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Championships and sackos
// ---------------------------------------------------------------------------

/// One manager's final placement for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStanding {
    pub manager: String,
    pub year: u16,
    /// Final placement, 1 = champion.
    pub place: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleCounts {
    pub manager: String,
    pub championships: u32,
    /// Last-place finishes.
    pub sackos: u32,
}

/// Count championships and last-place finishes per manager. A season still
/// in progress carries meaningless standings and is excluded.
pub fn championship_counts(
    standings: &[SeasonStanding],
    in_progress_year: Option<u16>,
) -> Vec<TitleCounts> {
    let completed: Vec<&SeasonStanding> = standings
        .iter()
        .filter(|s| Some(s.year) != in_progress_year)
        .collect();

    let mut last_place_by_year: HashMap<u16, u32> = HashMap::new();
    for s in &completed {
        let entry = last_place_by_year.entry(s.year).or_insert(0);
        *entry = (*entry).max(s.place);
    }

    let mut counts: HashMap<String, (u32, u32)> = HashMap::new();
    for s in &completed {
        let entry = counts.entry(s.manager.clone()).or_default();
        if s.place == 1 {
            entry.0 += 1;
        }
        if s.place == last_place_by_year[&s.year] {
            entry.1 += 1;
        }
    }

    let mut results: Vec<TitleCounts> = counts
        .into_iter()
        .filter(|(_, (champs, sackos))| *champs > 0 || *sackos > 0)
        .map(|(manager, (championships, sackos))| TitleCounts {
            manager,
            championships,
            sackos,
        })
        .collect();
    results.sort_by(|a, b| {
        b.championships
            .cmp(&a.championships)
            .then_with(|| a.manager.cmp(&b.manager))
    });
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        manager: &str,
        year: u16,
        week: u16,
        points: f64,
        against: f64,
        outcome: Outcome,
        game_type: GameType,
    ) -> ScoreRow {
        ScoreRow {
            manager: manager.into(),
            opponent: "Opp".into(),
            outcome,
            points_for: points,
            points_against: against,
            mov: points - against,
            week,
            game_type,
            year,
        }
    }

    fn season_win(manager: &str, year: u16, week: u16, points: f64) -> ScoreRow {
        row(manager, year, week, points, points - 10.0, Outcome::Win, GameType::Season)
    }

    fn season_loss(manager: &str, year: u16, week: u16, points: f64) -> ScoreRow {
        row(manager, year, week, points, points + 10.0, Outcome::Loss, GameType::Season)
    }

    #[test]
    fn records_count_and_rank_by_win_pct() {
        let rows = vec![
            season_win("Alex", 2022, 1, 100.0),
            season_win("Alex", 2022, 2, 100.0),
            season_loss("Alex", 2022, 3, 90.0),
            season_win("Bo", 2022, 1, 95.0),
            season_loss("Bo", 2022, 2, 85.0),
            season_loss("Bo", 2022, 3, 85.0),
        ];
        let records = all_time_records(&rows, &[GameType::Season]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].manager, "Alex");
        assert_eq!(records[0].record(), "2-1-0");
        assert!((records[0].win_pct - 66.666).abs() < 0.01);
        assert!((records[0].total_points - 290.0).abs() < 1e-9);
        assert_eq!(records[1].record(), "1-2-0");
    }

    #[test]
    fn ties_count_as_half_wins() {
        let rows = vec![
            row("Alex", 2022, 1, 100.0, 100.0, Outcome::Tie, GameType::Season),
            season_loss("Alex", 2022, 2, 90.0),
        ];
        let records = all_time_records(&rows, &[GameType::Season]);
        assert!((records[0].win_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn records_respect_game_type_filter() {
        let rows = vec![
            season_win("Alex", 2022, 1, 100.0),
            row("Alex", 2022, 15, 130.0, 100.0, Outcome::Win, GameType::Postseason),
        ];
        let season_only = all_time_records(&rows, &[GameType::Season]);
        assert_eq!(season_only[0].record(), "1-0-0");
        let both = all_time_records(&rows, &[GameType::Season, GameType::Postseason]);
        assert_eq!(both[0].record(), "2-0-0");
    }

    #[test]
    fn top_weekly_scores_both_directions() {
        let rows = vec![
            season_win("Alex", 2022, 1, 150.0),
            season_loss("Bo", 2022, 1, 60.0),
            season_win("Casey", 2022, 2, 120.0),
        ];
        let top = top_weekly_scores(&rows, GameType::Season, 2, false);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].manager, "Alex");
        assert_eq!(top[1].manager, "Casey");

        let bottom = top_weekly_scores(&rows, GameType::Season, 1, true);
        assert_eq!(bottom[0].manager, "Bo");
    }

    #[test]
    fn adjusted_ppg_recenters_eras() {
        // 2010 was a low-scoring era; Alex's 110 there beats Bo's 115 in the
        // high-scoring 2020 season once both are re-centered.
        let rows = vec![
            season_win("Alex", 2010, 1, 110.0),
            season_loss("Drew", 2010, 1, 70.0),
            season_win("Bo", 2020, 1, 115.0),
            season_loss("Drew", 2020, 1, 105.0),
        ];
        let entries = adjusted_ppg(&rows, GameType::Season, 10);
        let alex = entries.iter().find(|e| e.manager == "Alex").unwrap();
        let bo = entries.iter().find(|e| e.manager == "Bo").unwrap();
        assert!(alex.adjusted_ppg > bo.adjusted_ppg);
        assert!((alex.ppg - 110.0).abs() < 1e-9);
    }

    #[test]
    fn streaks_tracked_per_manager() {
        let rows = vec![
            season_win("Alex", 2022, 1, 100.0),
            season_win("Alex", 2022, 2, 100.0),
            season_win("Alex", 2022, 3, 100.0),
            season_loss("Alex", 2022, 4, 90.0),
            // Bo's first game is also a win; it must not extend Alex's run.
            season_win("Bo", 2022, 1, 95.0),
            season_loss("Bo", 2022, 2, 85.0),
        ];
        let streaks = longest_streaks(&rows, Outcome::Win, 10);
        assert_eq!(streaks[0].manager, "Alex");
        assert_eq!(streaks[0].length, 3);
        assert_eq!(streaks[0].span, "2022");
        let bo = streaks.iter().find(|s| s.manager == "Bo").unwrap();
        assert_eq!(bo.length, 1);
    }

    #[test]
    fn streaks_span_seasons() {
        let rows = vec![
            season_win("Alex", 2021, 13, 100.0),
            season_win("Alex", 2021, 14, 100.0),
            season_win("Alex", 2022, 1, 100.0),
        ];
        let streaks = longest_streaks(&rows, Outcome::Win, 10);
        assert_eq!(streaks[0].length, 3);
        assert_eq!(streaks[0].span, "2021-2022");
    }

    #[test]
    fn loss_streaks_broken_by_ties() {
        let rows = vec![
            season_loss("Alex", 2022, 1, 80.0),
            season_loss("Alex", 2022, 2, 80.0),
            row("Alex", 2022, 3, 90.0, 90.0, Outcome::Tie, GameType::Season),
            season_loss("Alex", 2022, 4, 80.0),
        ];
        let streaks = longest_streaks(&rows, Outcome::Loss, 10);
        assert_eq!(streaks[0].length, 2);
    }

    #[test]
    fn largest_margins_sorted() {
        let rows = vec![
            row("Alex", 2022, 1, 150.0, 60.0, Outcome::Win, GameType::Season),
            row("Bo", 2022, 2, 120.0, 110.0, Outcome::Win, GameType::Season),
        ];
        let margins = largest_margins(&rows, 10);
        assert_eq!(margins[0].winner, "Alex");
        assert!((margins[0].margin - 90.0).abs() < 1e-9);
        assert_eq!(margins[0].score, "150-60");
    }

    #[test]
    fn highest_scoring_games_use_combined_points() {
        let rows = vec![
            row("Alex", 2022, 1, 150.0, 60.0, Outcome::Win, GameType::Season),
            row("Bo", 2022, 2, 120.0, 118.0, Outcome::Win, GameType::Season),
        ];
        let games = highest_scoring_games(&rows, 10);
        assert_eq!(games[0].winner, "Bo");
        assert!((games[0].combined - 238.0).abs() < 1e-9);
    }

    #[test]
    fn championships_and_sackos_counted() {
        let standings = vec![
            SeasonStanding { manager: "Alex".into(), year: 2021, place: 1 },
            SeasonStanding { manager: "Bo".into(), year: 2021, place: 2 },
            SeasonStanding { manager: "Casey".into(), year: 2021, place: 3 },
            SeasonStanding { manager: "Alex".into(), year: 2022, place: 1 },
            SeasonStanding { manager: "Casey".into(), year: 2022, place: 2 },
            SeasonStanding { manager: "Bo".into(), year: 2022, place: 3 },
        ];
        let counts = championship_counts(&standings, None);
        let alex = counts.iter().find(|c| c.manager == "Alex").unwrap();
        assert_eq!(alex.championships, 2);
        assert_eq!(alex.sackos, 0);
        let bo = counts.iter().find(|c| c.manager == "Bo").unwrap();
        assert_eq!(bo.sackos, 1);
        let casey = counts.iter().find(|c| c.manager == "Casey").unwrap();
        assert_eq!(casey.sackos, 1);
    }

    #[test]
    fn in_progress_season_excluded_from_titles() {
        let standings = vec![
            SeasonStanding { manager: "Alex".into(), year: 2021, place: 1 },
            SeasonStanding { manager: "Bo".into(), year: 2021, place: 2 },
            SeasonStanding { manager: "Bo".into(), year: 2022, place: 1 },
            SeasonStanding { manager: "Alex".into(), year: 2022, place: 2 },
        ];
        let counts = championship_counts(&standings, Some(2022));
        let alex = counts.iter().find(|c| c.manager == "Alex").unwrap();
        assert_eq!(alex.championships, 1);
        assert!(counts.iter().find(|c| c.manager == "Bo").map_or(true, |c| c.championships == 0));
    }
}
