// League data provider seam.
//
// Retrieval of league data from the upstream fantasy platform is an external
// concern; this crate consumes it through the `LeagueProvider` trait. The
// shipped implementation reads exported season snapshots from disk
// (`snapshot::SnapshotProvider`); a live HTTP provider would slot in behind
// the same trait.

pub mod snapshot;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{BoxScore, DirectoryPlayer, DraftSelection, LeagueSettings, TeamSeason};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no snapshot found for season {year} at {path}")]
    MissingSeason { year: u16, path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("snapshot validation error: {0}")]
    Validation(String),
}

/// One season's worth of league data.
///
/// Calls may suspend (a live implementation performs network I/O); they are
/// the only suspension points in a report run. All returned structures are
/// plain owned data.
#[async_trait]
pub trait LeagueProvider: Send + Sync {
    /// The season this provider serves.
    fn year(&self) -> u16;

    /// League settings for the season.
    async fn settings(&self) -> Result<LeagueSettings, ProviderError>;

    /// Full season data per team. Teams whose data the platform has purged
    /// are simply absent.
    async fn team_seasons(&self) -> Result<Vec<TeamSeason>, ProviderError>;

    /// Final standings: manager names in finishing order (champion first).
    async fn final_standings(&self) -> Result<Vec<String>, ProviderError>;

    /// All matchups for one week, with full rosters on both sides.
    async fn box_scores(&self, week: u16) -> Result<Vec<BoxScore>, ProviderError>;

    /// The season's draft, in pick order.
    async fn draft(&self) -> Result<Vec<DraftSelection>, ProviderError>;

    /// League-wide player directory (for primary-position lookups).
    async fn player_directory(&self) -> Result<Vec<DirectoryPlayer>, ProviderError>;
}
