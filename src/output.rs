// CSV table output.
//
// Writes every table of a report bundle into the output directory, one CSV
// per table. This is the hand-off surface to the rendering layer; nothing
// is read back.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::report::ReportBundle;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

fn write_table<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<PathBuf, OutputError> {
    let path = dir.join(name);
    let mut writer = csv::Writer::from_path(&path).map_err(|e| OutputError::Csv {
        path: path.clone(),
        source: e,
    })?;
    for row in rows {
        writer.serialize(row).map_err(|e| OutputError::Csv {
            path: path.clone(),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| OutputError::Csv {
        path: path.clone(),
        source: csv::Error::from(e),
    })?;
    Ok(path)
}

/// Write every bundle table as a CSV file under `dir`, creating the
/// directory if needed. Returns the written paths.
pub fn write_bundle(bundle: &ReportBundle, dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    std::fs::create_dir_all(dir).map_err(|e| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::new();
    written.push(write_table(dir, "scores.csv", &bundle.scores)?);
    written.push(write_table(dir, "standings.csv", &bundle.standings)?);
    written.push(write_table(dir, "acquisitions.csv", &bundle.acquisitions)?);
    written.push(write_table(dir, "draft_board.csv", &bundle.draft_board)?);
    written.push(write_table(dir, "lineup_comparisons.csv", &bundle.comparisons)?);
    written.push(write_table(dir, "lineup_scores.csv", &bundle.lineup_scores)?);
    written.push(write_table(dir, "record_comparisons.csv", &bundle.record_comparisons)?);
    written.push(write_table(dir, "rolling_scores.csv", &bundle.rolling_scores)?);
    written.push(write_table(dir, "all_time_records.csv", &bundle.all_time)?);
    written.push(write_table(dir, "title_counts.csv", &bundle.title_counts)?);
    written.push(write_table(dir, "win_streaks.csv", &bundle.win_streaks)?);
    written.push(write_table(dir, "loss_streaks.csv", &bundle.loss_streaks)?);
    written.push(write_table(dir, "top_scores.csv", &bundle.top_scores)?);
    written.push(write_table(dir, "bottom_scores.csv", &bundle.bottom_scores)?);
    written.push(write_table(dir, "adjusted_ppg.csv", &bundle.adjusted_ppg)?);
    written.push(write_table(dir, "blowouts.csv", &bundle.blowouts)?);
    written.push(write_table(dir, "shootouts.csv", &bundle.shootouts)?);
    written.push(write_table(dir, "transaction_summaries.csv", &bundle.transaction_summaries)?);
    written.push(write_table(dir, "head_to_head.csv", &bundle.rivalries)?);

    info!(tables = written.len(), dir = %dir.display(), "report tables written");
    Ok(written)
}
