// Simulated (all-play) standings and reported-record comparison.
//
// The all-play simulation asks: if every team played every other team each
// week, what would the records look like? A team's weekly all-play wins are
// the number of teams it outscored; tied scores share the group's best-case
// wins and losses and make up the rest in ties.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analytics::scores::ScoreRow;
use crate::model::GameType;

/// Pythagorean exponent commonly used for fantasy point distributions.
const PYTHAGOREAN_EXPONENT: f64 = 6.2;

/// One team's all-play result for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllPlayRecord {
    pub manager: String,
    pub year: u16,
    pub week: u16,
    pub points_for: f64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Simulated-vs-reported season comparison for one manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecordComparison {
    pub manager: String,
    pub year: u16,
    /// All-play record over the season, "W-L-T".
    pub simulated: String,
    pub simulated_standing: u32,
    /// The record the league actually reported, "W-L-T".
    pub reported: String,
    pub reported_standing: u32,
    /// Simulated standing minus reported standing (negative = the schedule
    /// flattered this team).
    pub difference: i32,
    /// Pythagorean expected wins.
    pub expected_wins: f64,
}

/// Played regular-season rows for one year.
fn season_rows<'a>(rows: &'a [ScoreRow], year: u16) -> Vec<&'a ScoreRow> {
    rows.iter()
        .filter(|r| r.year == year && r.game_type == GameType::Season && r.outcome.is_played())
        .collect()
}

/// All-play records for a single week of one season.
pub fn weekly_all_play(rows: &[ScoreRow], year: u16, week: u16) -> Vec<AllPlayRecord> {
    let mut week_rows: Vec<&ScoreRow> = season_rows(rows, year)
        .into_iter()
        .filter(|r| r.week == week)
        .collect();
    // Ascending by points: a team's rank index is its all-play win count.
    week_rows.sort_by(|a, b| {
        a.points_for
            .partial_cmp(&b.points_for)
            .unwrap_or(Ordering::Equal)
    });

    let n = week_rows.len();
    let mut records: Vec<AllPlayRecord> = week_rows
        .iter()
        .enumerate()
        .map(|(i, r)| AllPlayRecord {
            manager: r.manager.clone(),
            year,
            week,
            points_for: r.points_for,
            wins: i as u32,
            losses: (n - 1 - i) as u32,
            ties: 0,
        })
        .collect();

    // Tied scores: every member of a tied group takes the group's minimum
    // wins and minimum losses, with ties covering the remainder.
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && records[end].points_for == records[start].points_for {
            end += 1;
        }
        if end - start > 1 {
            let min_wins = records[start].wins;
            let min_losses = records[end - 1].losses;
            for record in &mut records[start..end] {
                record.wins = min_wins;
                record.losses = min_losses;
                record.ties = (n as u32) - 1 - min_wins - min_losses;
            }
        }
        start = end;
    }

    records
}

/// All-play records for every week of one season.
pub fn season_all_play(rows: &[ScoreRow], year: u16) -> Vec<AllPlayRecord> {
    let max_week = season_rows(rows, year)
        .iter()
        .map(|r| r.week)
        .max()
        .unwrap_or(0);
    (1..=max_week)
        .flat_map(|week| weekly_all_play(rows, year, week))
        .collect()
}

/// Compare simulated and reported records for every manager in a season.
pub fn season_record_comparison(rows: &[ScoreRow], year: u16) -> Vec<SeasonRecordComparison> {
    let played = season_rows(rows, year);
    if played.is_empty() {
        return Vec::new();
    }
    let num_weeks = played.iter().map(|r| r.week).max().unwrap_or(0) as f64;

    // Simulated: sum all-play results per manager.
    let mut simulated: HashMap<String, (u32, u32, u32, f64)> = HashMap::new();
    for record in season_all_play(rows, year) {
        let entry = simulated.entry(record.manager).or_default();
        entry.0 += record.wins;
        entry.1 += record.losses;
        entry.2 += record.ties;
        entry.3 += record.points_for;
    }
    let mut simulated: Vec<(String, (u32, u32, u32, f64))> = simulated.into_iter().collect();
    simulated.sort_by(|a, b| {
        (b.1 .0, b.1 .3)
            .partial_cmp(&(a.1 .0, a.1 .3))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    // Reported: count outcomes per manager; rank by wins, then points
    // scored in wins.
    let mut reported: HashMap<String, (u32, u32, u32, f64)> = HashMap::new();
    for row in &played {
        let entry = reported.entry(row.manager.clone()).or_default();
        match row.outcome {
            crate::model::Outcome::Win => {
                entry.0 += 1;
                entry.3 += row.points_for;
            }
            crate::model::Outcome::Loss => entry.1 += 1,
            crate::model::Outcome::Tie => entry.2 += 1,
            crate::model::Outcome::Unplayed => {}
        }
    }
    let mut reported: Vec<(String, (u32, u32, u32, f64))> = reported.into_iter().collect();
    reported.sort_by(|a, b| {
        (b.1 .0, b.1 .3)
            .partial_cmp(&(a.1 .0, a.1 .3))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    // Points for/against for the Pythagorean expectation.
    let mut totals: HashMap<String, (f64, f64)> = HashMap::new();
    for row in &played {
        let entry = totals.entry(row.manager.clone()).or_default();
        entry.0 += row.points_for;
        entry.1 += row.points_against;
    }

    let reported_standing: HashMap<&str, u32> = reported
        .iter()
        .enumerate()
        .map(|(i, (m, _))| (m.as_str(), (i + 1) as u32))
        .collect();
    let reported_record: HashMap<&str, &(u32, u32, u32, f64)> =
        reported.iter().map(|(m, r)| (m.as_str(), r)).collect();

    simulated
        .iter()
        .enumerate()
        .map(|(i, (manager, sim))| {
            let sim_standing = (i + 1) as u32;
            let rep = reported_record.get(manager.as_str()).copied();
            let rep_standing = reported_standing.get(manager.as_str()).copied().unwrap_or(0);
            let (pf, pa) = totals.get(manager.as_str()).copied().unwrap_or((0.0, 0.0));
            let expected_wins = if pf > 0.0 || pa > 0.0 {
                let pf_exp = pf.powf(PYTHAGOREAN_EXPONENT);
                let pa_exp = pa.powf(PYTHAGOREAN_EXPONENT);
                pf_exp / (pf_exp + pa_exp) * num_weeks
            } else {
                0.0
            };
            SeasonRecordComparison {
                manager: manager.clone(),
                year,
                simulated: format!("{}-{}-{}", sim.0, sim.1, sim.2),
                simulated_standing: sim_standing,
                reported: rep
                    .map(|r| format!("{}-{}-{}", r.0, r.1, r.2))
                    .unwrap_or_else(|| "0-0-0".to_string()),
                reported_standing: rep_standing,
                difference: sim_standing as i32 - rep_standing as i32,
                expected_wins,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
