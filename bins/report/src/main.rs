//! Worklane report CLI.
//!
//! Loads a whole-system JSON snapshot, resolves the requested report
//! window, and prints the period report (or one of its derived views) as
//! JSON on stdout.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worklane_core::period::ReportWindow;
use worklane_core::report::{ReportEngine, RevenuePolicy};
use worklane_core::snapshot::{JsonFileSource, SnapshotSource};
use worklane_core::summary::SummaryService;
use worklane_shared::types::UserId;
use worklane_shared::{AppConfig, AppError, AppResult};

/// Run financial reports over a Worklane snapshot file.
#[derive(Debug, Parser)]
#[command(name = "worklane-report", version, about)]
struct Cli {
    /// Path to the JSON snapshot file.
    #[arg(long)]
    snapshot: PathBuf,

    /// Calendar month to report, as YYYY-MM.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    month: Option<String>,

    /// First day of a custom window, as YYYY-MM-DD.
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last day of a custom window, as YYYY-MM-DD.
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Print per-client rollup rows instead of the full report.
    #[arg(long, conflicts_with = "employee")]
    clients: bool,

    /// Print the yearly earnings summary for this employee instead.
    #[arg(long)]
    employee: Option<UserId>,

    /// Calendar year for the employee summary; defaults to the window's
    /// starting year.
    #[arg(long, requires = "employee")]
    year: Option<i32>,
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worklane=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error [{}]: {err}", err.error_code());
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = AppConfig::load()?;
    let window = resolve_window(cli)?;

    let source = JsonFileSource::new(&cli.snapshot);
    let snapshot = source.load(window)?;
    info!(
        users = snapshot.records.users.len(),
        projects = snapshot.records.projects.len(),
        time_entries = snapshot.records.time_entries.len(),
        from = %window.from,
        to = %window.to,
        "snapshot loaded"
    );

    if let Some(user_id) = cli.employee {
        let records = &snapshot.records;
        let user = records
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
        let year = cli.year.unwrap_or_else(|| window.from.year());
        let summary = SummaryService::year_summary(
            user,
            year,
            &records.projects,
            &records.assignments,
            &records.time_entries,
            &records.bonuses,
        );
        return print_json(&summary);
    }

    let engine = ReportEngine::new(RevenuePolicy {
        hourly_cost_markup: config.report.hourly_cost_markup,
    });
    let report = engine.compute(&snapshot);

    if cli.clients {
        print_json(&report.client_rollup())
    } else {
        print_json(&report)
    }
}

fn resolve_window(cli: &Cli) -> AppResult<ReportWindow> {
    if let Some(month) = cli.month.as_deref() {
        let (year, month) = parse_month_key(month)?;
        return Ok(ReportWindow::for_month(year, month)?);
    }
    match (cli.from, cli.to) {
        (Some(from), Some(to)) => Ok(ReportWindow::new(from, to)?),
        _ => Err(AppError::Validation(
            "provide --month YYYY-MM, or --from and --to".to_string(),
        )),
    }
}

/// Strict `YYYY-MM` parse.
fn parse_month_key(raw: &str) -> AppResult<(i32, u32)> {
    let invalid = || AppError::Validation(format!("month must be YYYY-MM, got {raw:?}"));
    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}
