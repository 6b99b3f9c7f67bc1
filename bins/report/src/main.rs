//! SPPD budget realization report.
//!
//! Reads a consistent snapshot of budget lines and assignments and prints the
//! reconciliation report.
//!
//! Usage:
//!   sppd-report                    - Realization per budget line
//!   sppd-report --stats            - Also print travel statistics
//!   sppd-report --traveler <id>    - Trip history for one traveler
//!   sppd-report --json             - Emit JSON instead of text

mod render;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use sppd_core::budget::{BudgetReconciler, ReconciliationReport};
use sppd_core::dashboard::{DashboardService, TravelStats, TravelerHistory};
use sppd_core::travel::DestinationCatalog;
use sppd_db::ReconciliationRepository;
use sppd_shared::AppConfig;
use sppd_shared::types::TravelerId;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "sppd-report", version, about = "Budget realization report for SPPD")]
struct Options {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print travel statistics
    #[arg(long)]
    stats: bool,

    /// Trip history for one traveler
    #[arg(long, value_name = "ID")]
    traveler: Option<TravelerId>,
}

/// Everything printed in one run.
#[derive(Debug, Serialize)]
struct Output {
    report: ReconciliationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<TravelStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<TravelerHistory>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let options = Options::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db = sppd_db::connect_with(&config.database).await?;
    info!("Connected to database");

    let snapshot = ReconciliationRepository::new(db).snapshot().await?;
    let catalog = DestinationCatalog::with_overrides(
        config.region.within_region.clone(),
        config.region.out_of_region.clone(),
    );

    let output = Output {
        report: BudgetReconciler::reconcile(&snapshot.budget_lines, &snapshot.assignments),
        stats: options
            .stats
            .then(|| DashboardService::travel_stats(&snapshot.assignments, &catalog)),
        history: options
            .traveler
            .map(|id| DashboardService::traveler_history(id, &snapshot.assignments)),
    };
    info!(
        budget_lines = output.report.lines.len(),
        assignments = snapshot.assignments.len(),
        "report computed"
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render::report(&output.report));
        if let Some(stats) = &output.stats {
            print!("{}", render::stats(stats));
        }
        if let Some(history) = &output.history {
            print!("{}", render::history(history));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_defaults() {
        let options = Options::try_parse_from(["sppd-report"]).unwrap();

        assert!(!options.json);
        assert!(!options.stats);
        assert_eq!(options.traveler, None);
    }

    #[test]
    fn test_parse_flags() {
        let id = TravelerId::new();
        let options =
            Options::try_parse_from(["sppd-report", "--json", "--stats", "--traveler", &id.to_string()])
                .unwrap();

        assert!(options.json);
        assert!(options.stats);
        assert_eq!(options.traveler, Some(id));

        let inline = Options::try_parse_from(["sppd-report", &format!("--traveler={id}")]).unwrap();
        assert_eq!(inline.traveler, Some(id));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Options::try_parse_from(["sppd-report", "--traveler"]).is_err());

        let malformed = Options::try_parse_from(["sppd-report", "--traveler", "nope"]).unwrap_err();
        assert_eq!(malformed.kind(), ErrorKind::ValueValidation);

        let unknown = Options::try_parse_from(["sppd-report", "--verbose"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_available() {
        let help = Options::try_parse_from(["sppd-report", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }
}
