// Provider-facing data entities: rosters, box scores, team seasons, drafts.
//
// Everything here is an already-parsed in-memory structure handed over by a
// `LeagueProvider`; this crate does not validate upstream data beyond what
// the snapshot loader skips at parse time.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::slot::Slot;

// ---------------------------------------------------------------------------
// Outcomes and game types
// ---------------------------------------------------------------------------

/// Result of a single scheduled game from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    /// Scheduled but not yet played (future week of an in-progress season).
    Unplayed,
}

impl Outcome {
    /// Parse the provider's single-letter outcome code.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "W" => Some(Outcome::Win),
            "L" => Some(Outcome::Loss),
            "T" => Some(Outcome::Tie),
            "U" => Some(Outcome::Unplayed),
            _ => None,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
            Outcome::Unplayed => "U",
        }
    }

    /// Whether the game has actually been played.
    pub fn is_played(&self) -> bool {
        !matches!(self, Outcome::Unplayed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.letter())
    }
}

/// Whether a game belongs to the regular season or the playoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Season,
    Postseason,
}

impl GameType {
    pub fn label(&self) -> &'static str {
        match self {
            GameType::Season => "season",
            GameType::Postseason => "postseason",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for GameType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Rosters and box scores
// ---------------------------------------------------------------------------

/// One rostered player for one team-week.
///
/// `lineup_slot` is the single slot the manager actually assigned the player
/// to before the week locked; it is always one of `eligible_slots`.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub name: String,
    /// Actual fantasy points scored (may be fractional).
    pub points: f64,
    /// Pre-game projected points from the provider.
    pub projected_points: f64,
    /// Every slot this player may legally occupy.
    pub eligible_slots: Vec<Slot>,
    /// The slot the player actually occupied this week.
    pub lineup_slot: Slot,
}

/// One side of a weekly matchup: a manager and their full roster
/// (starters + bench + IR).
#[derive(Debug, Clone)]
pub struct TeamLineup {
    pub manager: String,
    pub roster: Vec<RosterEntry>,
}

/// A single weekly matchup. Either side may be absent (bye, purged team).
#[derive(Debug, Clone)]
pub struct BoxScore {
    pub home: Option<TeamLineup>,
    pub away: Option<TeamLineup>,
}

// ---------------------------------------------------------------------------
// League settings and slot requirements
// ---------------------------------------------------------------------------

/// Starting-slot configuration: slot tag -> required starter count, in the
/// league's canonical order.
///
/// The ordering is load-bearing: the lineup optimizer fills slots in exactly
/// this order, and which player lands in which slot depends on it. It is
/// carried as an ordered list of pairs and never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct SlotCounts(Vec<(Slot, u32)>);

impl SlotCounts {
    pub fn new(pairs: Vec<(Slot, u32)>) -> Self {
        SlotCounts(pairs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, u32)> + '_ {
        self.0.iter().copied()
    }

    /// Required starter count for a slot (0 when the slot is not configured).
    pub fn count_for(&self, slot: Slot) -> u32 {
        self.0
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Total number of starting spots (bench and IR excluded).
    pub fn total_starters(&self) -> u32 {
        self.0
            .iter()
            .filter(|(s, _)| !s.is_bench_or_ir())
            .map(|(_, n)| *n)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-season league configuration as reported by the provider.
#[derive(Debug, Clone)]
pub struct LeagueSettings {
    /// Number of regular-season weeks; later weeks are postseason.
    pub reg_season_count: u16,
    /// The week currently in progress. Weeks before it are complete.
    pub current_week: u16,
    /// Canonical starting-slot configuration.
    pub slot_counts: SlotCounts,
}

// ---------------------------------------------------------------------------
// Team seasons, drafts, player directory
// ---------------------------------------------------------------------------

/// One team's full season as reported by the provider: parallel arrays of
/// schedule entries, one per week.
#[derive(Debug, Clone)]
pub struct TeamSeason {
    pub manager: String,
    /// Opponent manager per week.
    pub schedule: Vec<String>,
    pub outcomes: Vec<Outcome>,
    /// Points scored per week.
    pub scores: Vec<f64>,
    /// Margin of victory per week (negative for losses).
    pub mov: Vec<f64>,
    pub acquisitions: u32,
    pub trades: u32,
    pub faab_spent: u32,
}

/// A single draft selection.
#[derive(Debug, Clone)]
pub struct DraftSelection {
    pub round: u32,
    pub round_pick: u32,
    pub player: String,
    pub manager: String,
}

/// A league-wide player directory entry, used to resolve primary positions
/// for the draft board.
#[derive(Debug, Clone)]
pub struct DirectoryPlayer {
    pub name: String,
    pub eligible_slots: Vec<Slot>,
}
