//! relsheet - release-notes scraper CLI
//!
//! Scrapes release tables from documentation pages into one worksheet per
//! component and rebuilds a summary sheet of the latest releases.

use anyhow::Context;
use clap::Parser;
use relsheet::cli::CliArgs;
use relsheet::config::{load_groups, Settings};
use relsheet::orchestrator::{Orchestrator, RunOptions};
use relsheet::output::{create_formatter, OutputConfig};
use relsheet::sheets::{GoogleSheets, ServiceAccountKey};
use relsheet::source::HttpClient;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!(version = env!("CARGO_PKG_VERSION"), "starting relsheet");

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_cli(&args);

    // Target files are only needed when scraping
    let groups = if args.summary_only {
        Vec::new()
    } else {
        let selected = settings.select_groups(&args.group)?;
        load_groups(&selected)?
    };

    let key = ServiceAccountKey::from_file(&settings.credentials)?;
    let sheets = GoogleSheets::connect(&settings.spreadsheet, &key, settings.http.timeout())
        .await
        .with_context(|| format!("cannot open spreadsheet '{}'", settings.spreadsheet))?;

    let pages = HttpClient::with_config(settings.http.timeout(), &settings.http.user_agent)?
        .with_max_retries(settings.http.max_retries);

    if args.dry_run {
        info!("dry run, nothing will be written");
    }

    let orchestrator = Orchestrator::new(&pages, &sheets, settings.summary_sheet.clone())
        .with_options(RunOptions::from_cli(&args));
    let report = orchestrator.run(&groups).await;

    // Create output formatter based on CLI options
    let formatter = create_formatter(OutputConfig::from_cli(
        args.json,
        args.verbose,
        args.quiet,
        args.no_color,
    ));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Per-target failures are reported, not fatal
    Ok(ExitCode::SUCCESS)
}
