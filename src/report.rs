// Report orchestration.
//
// `ReportContext` is the explicit per-run state: configuration, one provider
// per season, and the manager-name map. It is created by the entry point,
// drives ingest and the lineup comparison once, and hands the resulting
// tables to the output layer. Nothing here outlives a run; every run
// recomputes from scratch.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::analytics::draft::{build_draft_board, DraftBoardRow};
use crate::analytics::head_to_head::{all_pair_summaries, RivalryRow};
use crate::analytics::records::{
    adjusted_ppg, all_time_records, championship_counts, highest_scoring_games, largest_margins,
    longest_streaks, top_weekly_scores, AdjustedPpg, ManagerRecord, MarginEntry, SeasonStanding,
    ShootoutEntry, StreakEntry, TitleCounts, WeeklyScore,
};
use crate::analytics::scores::{build_score_rows, rolling_three_week, RollingScore, ScoreRow};
use crate::analytics::standings::{season_record_comparison, SeasonRecordComparison};
use crate::analytics::transactions::{
    build_acquisition_rows, yearly_summaries, AcquisitionRow, YearlyTransactionSummary,
};
use crate::config::Config;
use crate::lineup::comparison::{compare_season, ComparisonRow, LineupScoreRow};
use crate::model::{GameType, Outcome};
use crate::names::NameMap;
use crate::provider::LeagueProvider;

/// Default leaderboard depth for the record tables.
const RECORD_TABLE_LIMIT: usize = 20;

/// Every table a report run produces, keyed by display-name managers and
/// ready for tabular or chart rendering.
#[derive(Debug, Default)]
pub struct ReportBundle {
    pub scores: Vec<ScoreRow>,
    pub standings: Vec<SeasonStanding>,
    pub acquisitions: Vec<AcquisitionRow>,
    pub draft_board: Vec<DraftBoardRow>,
    pub comparisons: Vec<ComparisonRow>,
    pub lineup_scores: Vec<LineupScoreRow>,
    pub record_comparisons: Vec<SeasonRecordComparison>,
    pub rolling_scores: Vec<RollingScore>,
    pub all_time: Vec<ManagerRecord>,
    pub title_counts: Vec<TitleCounts>,
    pub win_streaks: Vec<StreakEntry>,
    pub loss_streaks: Vec<StreakEntry>,
    pub top_scores: Vec<WeeklyScore>,
    pub bottom_scores: Vec<WeeklyScore>,
    pub adjusted_ppg: Vec<AdjustedPpg>,
    pub blowouts: Vec<MarginEntry>,
    pub shootouts: Vec<ShootoutEntry>,
    pub transaction_summaries: Vec<YearlyTransactionSummary>,
    pub rivalries: Vec<RivalryRow>,
}

/// One report run's explicit context.
pub struct ReportContext {
    config: Config,
    providers: Vec<Box<dyn LeagueProvider>>,
    name_map: NameMap,
}

impl ReportContext {
    pub fn new(
        config: Config,
        providers: Vec<Box<dyn LeagueProvider>>,
        name_map: NameMap,
    ) -> Self {
        ReportContext {
            config,
            providers,
            name_map,
        }
    }

    /// Seasons actually loaded, oldest first.
    pub fn loaded_years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self.providers.iter().map(|p| p.year()).collect();
        years.sort_unstable();
        years
    }

    /// Run the full report: ingest every season, run the lineup comparison
    /// for the comparison season, and derive the record tables.
    pub async fn run(&self) -> Result<ReportBundle> {
        if self.providers.is_empty() {
            bail!("no season snapshots loaded; nothing to report on");
        }

        let mut bundle = ReportBundle::default();

        for provider in &self.providers {
            let year = provider.year();
            let settings = provider
                .settings()
                .await
                .with_context(|| format!("failed to load settings for season {year}"))?;
            let teams = provider
                .team_seasons()
                .await
                .with_context(|| format!("failed to load team data for season {year}"))?;

            let mut rows = build_score_rows(year, settings.reg_season_count, &teams);
            for row in &mut rows {
                row.manager = self.name_map.resolve(&row.manager);
                row.opponent = self.name_map.resolve(&row.opponent);
            }
            info!(year, rows = rows.len(), "ingested season scores");
            bundle.scores.extend(rows);

            let mut acquisitions = build_acquisition_rows(year, &teams);
            for row in &mut acquisitions {
                row.manager = self.name_map.resolve(&row.manager);
            }
            bundle.acquisitions.extend(acquisitions);

            let final_order = provider
                .final_standings()
                .await
                .with_context(|| format!("failed to load standings for season {year}"))?;
            bundle
                .standings
                .extend(final_order.iter().enumerate().map(|(i, manager)| {
                    SeasonStanding {
                        manager: self.name_map.resolve(manager),
                        year,
                        place: (i + 1) as u32,
                    }
                }));

            let picks = provider
                .draft()
                .await
                .with_context(|| format!("failed to load draft for season {year}"))?;
            let directory = provider
                .player_directory()
                .await
                .with_context(|| format!("failed to load player directory for season {year}"))?;
            let mut board = build_draft_board(year, &picks, &directory);
            for row in &mut board {
                row.manager = self.name_map.resolve(&row.manager);
            }
            bundle.draft_board.extend(board);
        }

        self.run_lineup_comparison(&mut bundle).await?;

        // Derived tables over the full score history.
        for year in self.loaded_years() {
            bundle
                .record_comparisons
                .extend(season_record_comparison(&bundle.scores, year));
        }
        bundle.rolling_scores = rolling_three_week(&bundle.scores);
        bundle.all_time =
            all_time_records(&bundle.scores, &[GameType::Season, GameType::Postseason]);
        bundle.title_counts =
            championship_counts(&bundle.standings, self.in_progress_year(&bundle.scores));
        bundle.win_streaks = longest_streaks(&bundle.scores, Outcome::Win, RECORD_TABLE_LIMIT);
        bundle.loss_streaks = longest_streaks(&bundle.scores, Outcome::Loss, RECORD_TABLE_LIMIT);
        bundle.top_scores =
            top_weekly_scores(&bundle.scores, GameType::Season, RECORD_TABLE_LIMIT, false);
        bundle.bottom_scores =
            top_weekly_scores(&bundle.scores, GameType::Season, RECORD_TABLE_LIMIT, true);
        bundle.adjusted_ppg = adjusted_ppg(&bundle.scores, GameType::Season, RECORD_TABLE_LIMIT);
        bundle.blowouts = largest_margins(&bundle.scores, RECORD_TABLE_LIMIT);
        bundle.shootouts = highest_scoring_games(&bundle.scores, RECORD_TABLE_LIMIT);
        bundle.transaction_summaries = yearly_summaries(&bundle.acquisitions);
        bundle.rivalries =
            all_pair_summaries(&bundle.scores, &[GameType::Season, GameType::Postseason]);

        Ok(bundle)
    }

    /// Run the optimal-lineup comparison for the configured season (default:
    /// the most recent loaded one).
    async fn run_lineup_comparison(&self, bundle: &mut ReportBundle) -> Result<()> {
        let target_year = match self.config.report.comparison_year {
            Some(year) => year,
            None => match self.loaded_years().last().copied() {
                Some(year) => year,
                None => bail!("no season snapshots loaded"),
            },
        };
        let Some(provider) = self.providers.iter().find(|p| p.year() == target_year) else {
            bail!("comparison season {target_year} is not among the loaded snapshots");
        };

        let settings = provider
            .settings()
            .await
            .with_context(|| format!("failed to load settings for season {target_year}"))?;
        let (mut comparisons, mut lineup_scores) =
            compare_season(provider.as_ref(), &settings.slot_counts)
                .await
                .with_context(|| format!("lineup comparison failed for season {target_year}"))?;

        for row in &mut comparisons {
            row.manager = self.name_map.resolve(&row.manager);
        }
        for row in &mut lineup_scores {
            row.manager = self.name_map.resolve(&row.manager);
        }
        info!(
            year = target_year,
            comparisons = comparisons.len(),
            "lineup comparison complete"
        );

        bundle.comparisons = comparisons;
        bundle.lineup_scores = lineup_scores;
        Ok(())
    }

    /// The season still being played, if any: the latest year with unplayed
    /// games. Its standings are not final.
    fn in_progress_year(&self, scores: &[ScoreRow]) -> Option<u16> {
        let year = scores
            .iter()
            .filter(|r| r.outcome == Outcome::Unplayed)
            .map(|r| r.year)
            .max();
        if let Some(y) = year {
            warn!(year = y, "season in progress; excluding it from title counts");
        }
        year
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LeagueConfig, ReportConfig};
    use crate::lineup::comparison::ScoreKind;
    use crate::model::{
        BoxScore, DirectoryPlayer, DraftSelection, LeagueSettings, RosterEntry, SlotCounts,
        TeamLineup, TeamSeason,
    };
    use crate::provider::ProviderError;
    use crate::slot::Slot;
    use async_trait::async_trait;

    fn test_config(comparison_year: Option<u16>) -> Config {
        Config {
            league: LeagueConfig {
                name: "Test".into(),
                league_id: 1,
                start_year: 2022,
                skip_years: vec![],
                through_year: Some(2023),
            },
            report: ReportConfig {
                snapshot_dir: "snaps".into(),
                output_dir: "out".into(),
                manager_names: None,
                comparison_year,
            },
        }
    }

    struct SeasonFixture {
        year: u16,
        settings: LeagueSettings,
        teams: Vec<TeamSeason>,
        standings: Vec<String>,
        weeks: Vec<Vec<BoxScore>>,
    }

    #[async_trait]
    impl LeagueProvider for SeasonFixture {
        fn year(&self) -> u16 {
            self.year
        }

        async fn settings(&self) -> Result<LeagueSettings, ProviderError> {
            Ok(self.settings.clone())
        }

        async fn team_seasons(&self) -> Result<Vec<TeamSeason>, ProviderError> {
            Ok(self.teams.clone())
        }

        async fn final_standings(&self) -> Result<Vec<String>, ProviderError> {
            Ok(self.standings.clone())
        }

        async fn box_scores(&self, week: u16) -> Result<Vec<BoxScore>, ProviderError> {
            Ok(self
                .weeks
                .get((week as usize).saturating_sub(1))
                .cloned()
                .unwrap_or_default())
        }

        async fn draft(&self) -> Result<Vec<DraftSelection>, ProviderError> {
            Ok(vec![DraftSelection {
                round: 1,
                round_pick: 1,
                player: "Star Back".into(),
                manager: "alex doe".into(),
            }])
        }

        async fn player_directory(&self) -> Result<Vec<DirectoryPlayer>, ProviderError> {
            Ok(vec![DirectoryPlayer {
                name: "Star Back".into(),
                eligible_slots: vec![Slot::RunningBack, Slot::Bench],
            }])
        }
    }

    fn entry(name: &str, points: f64, eligible: &[Slot], lineup_slot: Slot) -> RosterEntry {
        RosterEntry {
            name: name.into(),
            points,
            projected_points: points,
            eligible_slots: eligible.to_vec(),
            lineup_slot,
        }
    }

    fn lineup(manager: &str, qb_points: f64) -> TeamLineup {
        TeamLineup {
            manager: manager.into(),
            roster: vec![
                entry("QB", qb_points, &[Slot::Quarterback, Slot::Bench], Slot::Quarterback),
                entry("RB", 8.0, &[Slot::RunningBack, Slot::Bench], Slot::RunningBack),
            ],
        }
    }

    fn season(year: u16, current_week: u16) -> SeasonFixture {
        let team = |manager: &str, outcomes: &[Outcome], scores: &[f64], mov: &[f64]| TeamSeason {
            manager: manager.into(),
            schedule: vec!["bo smith".into(); outcomes.len()],
            outcomes: outcomes.to_vec(),
            scores: scores.to_vec(),
            mov: mov.to_vec(),
            acquisitions: 3,
            trades: 1,
            faab_spent: 40,
        };
        SeasonFixture {
            year,
            settings: LeagueSettings {
                reg_season_count: 2,
                current_week,
                slot_counts: SlotCounts::new(vec![
                    (Slot::Quarterback, 1),
                    (Slot::RunningBack, 1),
                    (Slot::Bench, 2),
                ]),
            },
            teams: vec![
                team("alex doe", &[Outcome::Win, Outcome::Loss], &[100.0, 90.0], &[10.0, -5.0]),
                team("bo smith", &[Outcome::Loss, Outcome::Win], &[90.0, 95.0], &[-10.0, 5.0]),
            ],
            standings: vec!["alex doe".into(), "bo smith".into()],
            weeks: vec![vec![BoxScore {
                home: Some(lineup("alex doe", 10.0)),
                away: Some(lineup("bo smith", 9.0)),
            }]],
        }
    }

    fn context(comparison_year: Option<u16>) -> ReportContext {
        ReportContext::new(
            test_config(comparison_year),
            vec![Box::new(season(2022, 3)), Box::new(season(2023, 2))],
            NameMap::empty(),
        )
    }

    #[tokio::test]
    async fn run_assembles_all_tables() {
        let bundle = context(None).run().await.unwrap();

        // Two seasons, two teams, two games each.
        assert_eq!(bundle.scores.len(), 8);
        assert_eq!(bundle.standings.len(), 4);
        assert_eq!(bundle.acquisitions.len(), 4);
        assert_eq!(bundle.draft_board.len(), 2);
        assert_eq!(bundle.record_comparisons.len(), 4);
        assert!(!bundle.all_time.is_empty());
        assert!(!bundle.win_streaks.is_empty());
        assert!(!bundle.top_scores.is_empty());
        assert!(!bundle.bottom_scores.is_empty());
        assert!(!bundle.adjusted_ppg.is_empty());
        assert!(!bundle.blowouts.is_empty());
        assert!(!bundle.shootouts.is_empty());
        assert_eq!(bundle.transaction_summaries.len(), 2);
        assert!(!bundle.rivalries.is_empty());
    }

    #[tokio::test]
    async fn managers_resolved_to_display_names() {
        let bundle = context(None).run().await.unwrap();
        assert!(bundle.scores.iter().all(|r| r.manager == "Alex Doe" || r.manager == "Bo Smith"));
        assert!(bundle.standings.iter().any(|s| s.manager == "Alex Doe"));
        assert!(bundle.draft_board.iter().all(|r| r.manager == "Alex Doe"));
        assert!(bundle.lineup_scores.iter().all(|s| s.manager == "Alex Doe" || s.manager == "Bo Smith"));
    }

    #[tokio::test]
    async fn comparison_defaults_to_latest_season() {
        let bundle = context(None).run().await.unwrap();
        // 2023 has current_week 2: one completed week, two teams, three
        // score rows each.
        assert_eq!(bundle.lineup_scores.len(), 6);
        assert!(bundle.lineup_scores.iter().all(|s| s.year == 2023));
    }

    #[tokio::test]
    async fn comparison_year_override_respected() {
        let bundle = context(Some(2022)).run().await.unwrap();
        assert!(bundle.lineup_scores.iter().all(|s| s.year == 2022));
        // 2022 has current_week 3 but only one week of box scores.
        assert_eq!(bundle.lineup_scores.len(), 6);
    }

    #[tokio::test]
    async fn missing_comparison_year_is_an_error() {
        let err = context(Some(2019)).run().await.unwrap_err();
        assert!(err.to_string().contains("2019"));
    }

    #[tokio::test]
    async fn no_providers_is_an_error() {
        let ctx = ReportContext::new(test_config(None), vec![], NameMap::empty());
        assert!(ctx.run().await.is_err());
    }

    #[tokio::test]
    async fn lineup_scores_carry_expected_kinds() {
        let bundle = context(None).run().await.unwrap();
        let alex: Vec<_> = bundle
            .lineup_scores
            .iter()
            .filter(|s| s.manager == "Alex Doe")
            .collect();
        assert_eq!(alex.len(), 3);
        assert!(alex.iter().any(|s| s.kind == ScoreKind::Original));
        assert!(alex.iter().any(|s| s.kind == ScoreKind::Optimal));
        assert!(alex.iter().any(|s| s.kind == ScoreKind::Projected));
    }

    #[tokio::test]
    async fn run_twice_yields_identical_tables() {
        let ctx = context(None);
        let first = ctx.run().await.unwrap();
        let second = ctx.run().await.unwrap();
        assert_eq!(first.scores, second.scores);
        assert_eq!(first.comparisons, second.comparisons);
        assert_eq!(first.lineup_scores, second.lineup_scores);
        assert_eq!(first.record_comparisons, second.record_comparisons);
        assert_eq!(first.all_time, second.all_time);
        assert_eq!(first.adjusted_ppg, second.adjusted_ppg);
        assert_eq!(first.rivalries, second.rivalries);
    }
}
