// Head-to-head matchup filtering and summaries.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::scores::ScoreRow;
use crate::model::{GameType, Outcome};

/// Aggregate record of one manager group against another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadSummary {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

impl HeadToHeadSummary {
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Filter the score table down to games where `managers` faced `opponents`
/// in one of the given game types. Unplayed games are excluded.
pub fn head_to_head_games(
    rows: &[ScoreRow],
    managers: &[String],
    opponents: &[String],
    game_types: &[GameType],
) -> Vec<ScoreRow> {
    rows.iter()
        .filter(|r| {
            r.outcome.is_played()
                && managers.iter().any(|m| *m == r.manager)
                && opponents.iter().any(|o| *o == r.opponent)
                && game_types.contains(&r.game_type)
        })
        .cloned()
        .collect()
}

/// Summarize a filtered set of head-to-head games.
pub fn summarize(games: &[ScoreRow]) -> HeadToHeadSummary {
    let mut summary = HeadToHeadSummary {
        wins: 0,
        losses: 0,
        ties: 0,
        points_for: 0.0,
        points_against: 0.0,
    };
    for game in games {
        match game.outcome {
            Outcome::Win => summary.wins += 1,
            Outcome::Loss => summary.losses += 1,
            Outcome::Tie => summary.ties += 1,
            Outcome::Unplayed => {}
        }
        summary.points_for += game.points_for;
        summary.points_against += game.points_against;
    }
    summary
}

/// Career rivalry summary between one manager and one opponent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RivalryRow {
    pub manager: String,
    pub opponent: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

/// Pairwise career summaries for every manager/opponent pairing that played
/// at least one game of the given types, sorted by manager then opponent.
pub fn all_pair_summaries(rows: &[ScoreRow], game_types: &[GameType]) -> Vec<RivalryRow> {
    let mut pairs: Vec<(String, String)> = rows
        .iter()
        .filter(|r| r.outcome.is_played() && game_types.contains(&r.game_type))
        .map(|r| (r.manager.clone(), r.opponent.clone()))
        .collect();
    pairs.sort();
    pairs.dedup();

    pairs
        .into_iter()
        .map(|(manager, opponent)| {
            let games = head_to_head_games(
                rows,
                std::slice::from_ref(&manager),
                std::slice::from_ref(&opponent),
                game_types,
            );
            let summary = summarize(&games);
            RivalryRow {
                manager,
                opponent,
                wins: summary.wins,
                losses: summary.losses,
                ties: summary.ties,
                points_for: summary.points_for,
                points_against: summary.points_against,
            }
        })
        .collect()
}

/// Cumulative win/loss counts and points by year, for time-series rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeYear {
    pub year: u16,
    pub wins: u32,
    pub losses: u32,
    pub points_for: f64,
    pub points_against: f64,
}

/// Year-by-year running totals over a filtered set of games.
pub fn cumulative_by_year(games: &[ScoreRow]) -> Vec<CumulativeYear> {
    let mut per_year: BTreeMap<u16, (u32, u32, f64, f64)> = BTreeMap::new();
    for game in games {
        let entry = per_year.entry(game.year).or_default();
        match game.outcome {
            Outcome::Win => entry.0 += 1,
            Outcome::Loss => entry.1 += 1,
            _ => {}
        }
        entry.2 += game.points_for;
        entry.3 += game.points_against;
    }

    let mut running = (0u32, 0u32, 0.0f64, 0.0f64);
    per_year
        .into_iter()
        .map(|(year, (w, l, pf, pa))| {
            running.0 += w;
            running.1 += l;
            running.2 += pf;
            running.3 += pa;
            CumulativeYear {
                year,
                wins: running.0,
                losses: running.1,
                points_for: running.2,
                points_against: running.3,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
