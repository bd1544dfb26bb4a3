// JSON season-snapshot provider.
//
// Reads one exported `<year>.json` file per season from a snapshot
// directory. The raw serde structs keep slots and outcomes as strings; the
// loader converts them to domain types, skipping anything it cannot
// interpret rather than failing the whole season.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use super::{LeagueProvider, ProviderError};
use crate::model::{
    BoxScore, DirectoryPlayer, DraftSelection, LeagueSettings, Outcome, RosterEntry, SlotCounts,
    TeamLineup, TeamSeason,
};
use crate::slot::Slot;

// ---------------------------------------------------------------------------
// Raw serde structs (private): snapshot wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    settings: RawSettings,
    #[serde(default)]
    team_seasons: Vec<RawTeamSeason>,
    #[serde(default)]
    standings: Vec<String>,
    #[serde(default)]
    draft: Vec<RawDraftPick>,
    #[serde(default)]
    players: Vec<RawDirectoryPlayer>,
    #[serde(default)]
    weeks: Vec<RawWeek>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    reg_season_count: u16,
    current_week: u16,
    /// Ordered (tag, count) pairs; order is the league's canonical slot order.
    slot_counts: Vec<(String, u32)>,
}

#[derive(Debug, Deserialize)]
struct RawTeamSeason {
    manager: String,
    schedule: Vec<String>,
    outcomes: Vec<String>,
    scores: Vec<f64>,
    mov: Vec<f64>,
    #[serde(default)]
    acquisitions: u32,
    #[serde(default)]
    trades: u32,
    #[serde(default)]
    faab_spent: u32,
}

#[derive(Debug, Deserialize)]
struct RawDraftPick {
    round: u32,
    round_pick: u32,
    player: String,
    manager: String,
}

#[derive(Debug, Deserialize)]
struct RawDirectoryPlayer {
    name: String,
    eligible_slots: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawWeek {
    week: u16,
    matchups: Vec<RawMatchup>,
}

#[derive(Debug, Deserialize)]
struct RawMatchup {
    #[serde(default)]
    home: Option<RawTeamLineup>,
    #[serde(default)]
    away: Option<RawTeamLineup>,
}

#[derive(Debug, Deserialize)]
struct RawTeamLineup {
    manager: String,
    roster: Vec<RawRosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RawRosterEntry {
    name: String,
    points: f64,
    #[serde(default)]
    projected_points: f64,
    eligible_slots: Vec<String>,
    lineup_slot: String,
}

// ---------------------------------------------------------------------------
// Raw -> domain conversion
// ---------------------------------------------------------------------------

fn convert_slot_counts(raw: &[(String, u32)]) -> SlotCounts {
    let mut pairs = Vec::with_capacity(raw.len());
    for (tag, count) in raw {
        match Slot::from_tag(tag) {
            Some(slot) => pairs.push((slot, *count)),
            None => warn!("skipping unknown slot tag '{}' in slot counts", tag),
        }
    }
    SlotCounts::new(pairs)
}

fn convert_roster_entry(raw: &RawRosterEntry) -> Option<RosterEntry> {
    let Some(lineup_slot) = Slot::from_tag(&raw.lineup_slot) else {
        warn!(
            "skipping roster entry '{}': unknown lineup slot '{}'",
            raw.name, raw.lineup_slot
        );
        return None;
    };
    let eligible_slots: Vec<Slot> = raw
        .eligible_slots
        .iter()
        .filter_map(|tag| {
            let slot = Slot::from_tag(tag);
            if slot.is_none() {
                warn!("ignoring unknown eligible slot '{}' for '{}'", tag, raw.name);
            }
            slot
        })
        .collect();
    Some(RosterEntry {
        name: raw.name.trim().to_string(),
        points: raw.points,
        projected_points: raw.projected_points,
        eligible_slots,
        lineup_slot,
    })
}

fn convert_lineup(raw: &RawTeamLineup) -> TeamLineup {
    TeamLineup {
        manager: raw.manager.trim().to_string(),
        roster: raw.roster.iter().filter_map(convert_roster_entry).collect(),
    }
}

fn convert_team_season(raw: &RawTeamSeason) -> Option<TeamSeason> {
    let mut outcomes = Vec::with_capacity(raw.outcomes.len());
    for code in &raw.outcomes {
        match Outcome::from_letter(code) {
            Some(outcome) => outcomes.push(outcome),
            None => {
                warn!(
                    "skipping team season for '{}': unknown outcome code '{}'",
                    raw.manager, code
                );
                return None;
            }
        }
    }
    Some(TeamSeason {
        manager: raw.manager.trim().to_string(),
        schedule: raw.schedule.iter().map(|s| s.trim().to_string()).collect(),
        outcomes,
        scores: raw.scores.clone(),
        mov: raw.mov.clone(),
        acquisitions: raw.acquisitions,
        trades: raw.trades,
        faab_spent: raw.faab_spent,
    })
}

// ---------------------------------------------------------------------------
// SnapshotProvider
// ---------------------------------------------------------------------------

/// A `LeagueProvider` backed by one season's exported JSON snapshot.
#[derive(Debug)]
pub struct SnapshotProvider {
    year: u16,
    snapshot: RawSnapshot,
}

impl SnapshotProvider {
    /// Load the snapshot for `year` from `<dir>/<year>.json`.
    pub fn load(dir: &Path, year: u16) -> Result<Self, ProviderError> {
        let path = dir.join(format!("{year}.json"));
        if !path.exists() {
            return Err(ProviderError::MissingSeason { year, path });
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ProviderError::Io {
            path: path.clone(),
            source: e,
        })?;
        let snapshot: RawSnapshot =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse { path, source: e })?;
        if snapshot.settings.slot_counts.is_empty() {
            return Err(ProviderError::Validation(format!(
                "season {year} snapshot has an empty slot configuration"
            )));
        }
        Ok(SnapshotProvider { year, snapshot })
    }

    #[cfg(test)]
    fn from_json(year: u16, json: &str) -> Result<Self, serde_json::Error> {
        Ok(SnapshotProvider {
            year,
            snapshot: serde_json::from_str(json)?,
        })
    }
}

#[async_trait]
impl LeagueProvider for SnapshotProvider {
    fn year(&self) -> u16 {
        self.year
    }

    async fn settings(&self) -> Result<LeagueSettings, ProviderError> {
        Ok(LeagueSettings {
            reg_season_count: self.snapshot.settings.reg_season_count,
            current_week: self.snapshot.settings.current_week,
            slot_counts: convert_slot_counts(&self.snapshot.settings.slot_counts),
        })
    }

    async fn team_seasons(&self) -> Result<Vec<TeamSeason>, ProviderError> {
        Ok(self
            .snapshot
            .team_seasons
            .iter()
            .filter_map(convert_team_season)
            .collect())
    }

    async fn final_standings(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self
            .snapshot
            .standings
            .iter()
            .map(|s| s.trim().to_string())
            .collect())
    }

    async fn box_scores(&self, week: u16) -> Result<Vec<BoxScore>, ProviderError> {
        let Some(raw_week) = self.snapshot.weeks.iter().find(|w| w.week == week) else {
            return Ok(Vec::new());
        };
        Ok(raw_week
            .matchups
            .iter()
            .map(|m| BoxScore {
                home: m.home.as_ref().map(convert_lineup),
                away: m.away.as_ref().map(convert_lineup),
            })
            .collect())
    }

    async fn draft(&self) -> Result<Vec<DraftSelection>, ProviderError> {
        Ok(self
            .snapshot
            .draft
            .iter()
            .map(|p| DraftSelection {
                round: p.round,
                round_pick: p.round_pick,
                player: p.player.trim().to_string(),
                manager: p.manager.trim().to_string(),
            })
            .collect())
    }

    async fn player_directory(&self) -> Result<Vec<DirectoryPlayer>, ProviderError> {
        Ok(self
            .snapshot
            .players
            .iter()
            .map(|p| DirectoryPlayer {
                name: p.name.trim().to_string(),
                eligible_slots: p
                    .eligible_slots
                    .iter()
                    .filter_map(|tag| Slot::from_tag(tag))
                    .collect(),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
