// League almanac entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config
// 3. Load the manager-name map (optional)
// 4. Load one season snapshot per configured year
// 5. Run the report (ingest + analytics + lineup comparison)
// 6. Write the output tables

use league_almanac::config;
use league_almanac::names::NameMap;
use league_almanac::output;
use league_almanac::provider::snapshot::SnapshotProvider;
use league_almanac::provider::{LeagueProvider, ProviderError};
use league_almanac::report::ReportContext;

use anyhow::Context;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("League almanac starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={} (id {}), seasons {}..",
        config.league.name, config.league.league_id, config.league.start_year
    );

    // 3. Manager-name map (optional)
    let name_map = match &config.report.manager_names {
        Some(path) => {
            let map = NameMap::from_path(Path::new(path))
                .with_context(|| format!("failed to load manager names from {path}"))?;
            info!("Loaded {} manager name mappings", map.len());
            map
        }
        None => NameMap::empty(),
    };

    // 4. Load season snapshots. A missing season is skipped with a warning;
    // anything else (unreadable, malformed) is fatal.
    let snapshot_dir = Path::new(&config.report.snapshot_dir);
    let mut providers: Vec<Box<dyn LeagueProvider>> = Vec::new();
    for year in config.seasons() {
        match SnapshotProvider::load(snapshot_dir, year) {
            Ok(provider) => providers.push(Box::new(provider)),
            Err(ProviderError::MissingSeason { year, path }) => {
                warn!("no snapshot for season {} (expected {})", year, path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to load snapshot for season {year}"));
            }
        }
    }
    info!("Loaded {} season snapshots", providers.len());

    // 5. Run the report
    let context = ReportContext::new(config.clone(), providers, name_map);
    let bundle = context.run().await.context("report run failed")?;
    info!(
        "Report complete: {} score rows, {} comparison rows, {} lineup score rows",
        bundle.scores.len(),
        bundle.comparisons.len(),
        bundle.lineup_scores.len()
    );

    // 6. Write the output tables
    let written = output::write_bundle(&bundle, Path::new(&config.report.output_dir))
        .context("failed to write output tables")?;
    info!("Wrote {} tables to {}", written.len(), config.report.output_dir);

    Ok(())
}

/// Initialize tracing to stderr with an env-filter override
/// (`RUST_LOG=league_almanac=debug` and friends).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("league_almanac=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
