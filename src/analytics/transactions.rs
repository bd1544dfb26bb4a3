// Acquisition, trade, and FAAB aggregation.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::TeamSeason;

/// One manager's transaction activity for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionRow {
    pub manager: String,
    pub year: u16,
    pub pickups: u32,
    pub trades: u32,
    pub faab_spent: u32,
}

/// Flatten provider team data into acquisition rows for one season.
pub fn build_acquisition_rows(year: u16, teams: &[TeamSeason]) -> Vec<AcquisitionRow> {
    teams
        .iter()
        .map(|t| AcquisitionRow {
            manager: t.manager.clone(),
            year,
            pickups: t.acquisitions,
            trades: t.trades,
            faab_spent: t.faab_spent,
        })
        .collect()
}

/// League-wide transaction metrics for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTransactionSummary {
    pub year: u16,
    /// Every trade involves two teams, so this double-counts by side,
    /// consistent with how the provider reports per-team trade counts.
    pub total_trades: u32,
    pub mean_pickups: f64,
    pub mean_faab_spent: f64,
}

/// Per-year league aggregates across all seasons, oldest first.
pub fn yearly_summaries(rows: &[AcquisitionRow]) -> Vec<YearlyTransactionSummary> {
    let mut per_year: BTreeMap<u16, (u32, u32, u32, u32)> = BTreeMap::new();
    for row in rows {
        let entry = per_year.entry(row.year).or_default();
        entry.0 += row.trades;
        entry.1 += row.pickups;
        entry.2 += row.faab_spent;
        entry.3 += 1;
    }
    per_year
        .into_iter()
        .map(|(year, (trades, pickups, faab, teams))| YearlyTransactionSummary {
            year,
            total_trades: trades,
            mean_pickups: pickups as f64 / teams as f64,
            mean_faab_spent: faab as f64 / teams as f64,
        })
        .collect()
}
