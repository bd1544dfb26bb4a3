// Configuration loading and parsing (config/league.toml).

use chrono::Datelike;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    league: LeagueConfig,
    report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub league_id: u64,
    /// Inaugural season.
    pub start_year: u16,
    /// Seasons to skip entirely (e.g. a year whose data the platform
    /// corrupted).
    #[serde(default)]
    pub skip_years: Vec<u16>,
    /// Final season to ingest. Defaults to the current calendar year.
    #[serde(default)]
    pub through_year: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory of exported `<year>.json` season snapshots.
    pub snapshot_dir: String,
    /// Directory the output tables are written to.
    pub output_dir: String,
    /// Optional CSV (ID,Name headers) remapping owner IDs to display names.
    #[serde(default)]
    pub manager_names: Option<String>,
    /// Season to run the lineup comparison for. Defaults to the most recent
    /// ingested season.
    #[serde(default)]
    pub comparison_year: Option<u16>,
}

/// The assembled application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub report: ReportConfig,
}

impl Config {
    /// Every season to ingest, oldest first, with skip years removed.
    pub fn seasons(&self) -> Vec<u16> {
        let through = self
            .league
            .through_year
            .unwrap_or_else(|| chrono::Utc::now().year() as u16);
        (self.league.start_year..=through)
            .filter(|y| !self.league.skip_years.contains(y))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to the
/// given `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("league.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        league: file.league,
        report: file.report,
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.league_id == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.league_id".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.league.start_year < 2000 {
        return Err(ConfigError::ValidationError {
            field: "league.start_year".into(),
            message: format!("must be 2000 or later, got {}", config.league.start_year),
        });
    }

    if let Some(through) = config.league.through_year {
        if through < config.league.start_year {
            return Err(ConfigError::ValidationError {
                field: "league.through_year".into(),
                message: format!(
                    "must not precede start_year ({}), got {through}",
                    config.league.start_year
                ),
            });
        }
    }

    if config.report.snapshot_dir.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "report.snapshot_dir".into(),
            message: "must not be empty".into(),
        });
    }

    if config.report.output_dir.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "report.output_dir".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
