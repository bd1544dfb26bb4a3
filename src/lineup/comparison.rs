// Season-wide optimal/original/projected lineup comparison.
//
// Drives the optimizer across every completed week, both sides of every
// matchup, and joins each optimal lineup against the lineup the manager
// actually started. The join is a rank-zip: both sides are ordered by slot
// group and paired positionally. It is NOT an identity join: row i pairs
// the i-th optimal pick with the i-th original pick after each side is
// independently sorted, and when group sizes differ across slot categories
// the two sides of a row can name different slots. Downstream tables are
// built against exactly this pairing, so it is preserved as-is.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::lineup::optimizer::{optimize, OptimalLineup};
use crate::model::{RosterEntry, SlotCounts, TeamLineup};
use crate::provider::{LeagueProvider, ProviderError};
use crate::slot::Slot;

// ---------------------------------------------------------------------------
// Original lineup extraction
// ---------------------------------------------------------------------------

/// The lineup the manager actually started: every roster entry whose
/// assigned slot is not bench or IR, with actual and projected score sums.
#[derive(Debug, Clone)]
pub struct OriginalLineup {
    pub entries: Vec<RosterEntry>,
    pub score: f64,
    pub projected_score: f64,
}

pub fn original_lineup(roster: &[RosterEntry]) -> OriginalLineup {
    let entries: Vec<RosterEntry> = roster
        .iter()
        .filter(|p| !p.lineup_slot.is_bench_or_ir())
        .cloned()
        .collect();
    let score = entries.iter().map(|p| p.points).sum();
    let projected_score = entries.iter().map(|p| p.projected_points).sum();
    OriginalLineup {
        entries,
        score,
        projected_score,
    }
}

// ---------------------------------------------------------------------------
// Rank-zip join
// ---------------------------------------------------------------------------

/// One positional pairing from the rank-zip: the optimal side and the
/// original side, either of which may be absent when the lineups differ in
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct RankZipPair {
    pub optimal: Option<(Slot, String)>,
    pub original: Option<(Slot, String)>,
}

/// Pair an optimal lineup with an original lineup by rank within slot group.
///
/// The original entries are stably reordered using the optimal lineup's
/// slot-appearance order as the category order; slots the optimal lineup
/// never uses sort last. The two sequences are then zipped row-wise, padding
/// whichever side is shorter.
pub fn rank_zip(optimal: &OptimalLineup, original: &OriginalLineup) -> Vec<RankZipPair> {
    // Category order: first appearance of each slot in the optimal sequence.
    let mut categories: Vec<Slot> = Vec::new();
    for a in &optimal.assignments {
        if !categories.contains(&a.slot) {
            categories.push(a.slot);
        }
    }
    let category_rank = |slot: Slot| -> usize {
        categories
            .iter()
            .position(|&c| c == slot)
            .unwrap_or(usize::MAX)
    };

    // Stable sort: entries within the same slot group keep roster order.
    let mut ordered: Vec<&RosterEntry> = original.entries.iter().collect();
    ordered.sort_by_key(|p| category_rank(p.lineup_slot));

    let rows = optimal.assignments.len().max(ordered.len());
    (0..rows)
        .map(|i| RankZipPair {
            optimal: optimal
                .assignments
                .get(i)
                .map(|a| (a.slot, a.player.name.clone())),
            original: ordered.get(i).map(|p| (p.lineup_slot, p.name.clone())),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Comparison and score rows
// ---------------------------------------------------------------------------

/// Tag for the three per-team-week score records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Original,
    /// The improvement available over the original lineup
    /// (optimal score minus original score), not the raw optimal score.
    Optimal,
    Projected,
}

impl ScoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreKind::Original => "original",
            ScoreKind::Optimal => "optimal",
            ScoreKind::Projected => "projected",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for ScoreKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of the season comparison table: the i-th optimal pick paired
/// with the i-th original pick for a team-week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub manager: String,
    pub year: u16,
    pub week: u16,
    pub optimal_slot: Option<Slot>,
    pub optimal_player: Option<String>,
    pub original_slot: Option<Slot>,
    pub original_player: Option<String>,
}

/// One of the three score records emitted per team-week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupScoreRow {
    pub manager: String,
    pub year: u16,
    pub week: u16,
    pub kind: ScoreKind,
    pub score: f64,
}

/// Compare one team-week: optimal vs. original vs. projected.
///
/// The optimizer runs on its own copy of the roster; the original lineup is
/// read from the untouched input.
pub fn compare_team(
    lineup: &TeamLineup,
    year: u16,
    week: u16,
    slot_counts: &SlotCounts,
) -> (Vec<ComparisonRow>, Vec<LineupScoreRow>) {
    let original = original_lineup(&lineup.roster);
    let optimal = optimize(slot_counts, lineup.roster.clone());

    let comparisons = rank_zip(&optimal, &original)
        .into_iter()
        .map(|pair| ComparisonRow {
            manager: lineup.manager.clone(),
            year,
            week,
            optimal_slot: pair.optimal.as_ref().map(|(s, _)| *s),
            optimal_player: pair.optimal.map(|(_, n)| n),
            original_slot: pair.original.as_ref().map(|(s, _)| *s),
            original_player: pair.original.map(|(_, n)| n),
        })
        .collect();

    let scores = vec![
        LineupScoreRow {
            manager: lineup.manager.clone(),
            year,
            week,
            kind: ScoreKind::Original,
            score: original.score,
        },
        LineupScoreRow {
            manager: lineup.manager.clone(),
            year,
            week,
            kind: ScoreKind::Optimal,
            score: optimal.score - original.score,
        },
        LineupScoreRow {
            manager: lineup.manager.clone(),
            year,
            week,
            kind: ScoreKind::Projected,
            score: original.projected_score,
        },
    ];

    (comparisons, scores)
}

// ---------------------------------------------------------------------------
// Season aggregator
// ---------------------------------------------------------------------------

/// Run the lineup comparison for every completed week of a season.
///
/// Weeks run from 1 to the league's current week minus one; the current,
/// possibly in-progress week is excluded. Within a week every matchup's
/// home side is processed first, then every away side. A side with no data
/// (bye, purged team) is skipped without a record.
pub async fn compare_season(
    provider: &dyn LeagueProvider,
    slot_counts: &SlotCounts,
) -> Result<(Vec<ComparisonRow>, Vec<LineupScoreRow>), ProviderError> {
    let settings = provider.settings().await?;
    let year = provider.year();

    let mut all_comparisons = Vec::new();
    let mut all_scores = Vec::new();

    for week in 1..settings.current_week {
        let box_scores = provider.box_scores(week).await?;
        debug!(year, week, matchups = box_scores.len(), "comparing lineups");

        for matchup in &box_scores {
            if let Some(home) = &matchup.home {
                let (comps, scores) = compare_team(home, year, week, slot_counts);
                all_comparisons.extend(comps);
                all_scores.extend(scores);
            }
        }
        for matchup in &box_scores {
            if let Some(away) = &matchup.away {
                let (comps, scores) = compare_team(away, year, week, slot_counts);
                all_comparisons.extend(comps);
                all_scores.extend(scores);
            }
        }
    }

    Ok((all_comparisons, all_scores))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
