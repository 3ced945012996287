//! CLI argument parsing module for relsheet

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Release-notes scraper that keeps a Google spreadsheet up to date
#[derive(Parser, Debug, Clone)]
#[command(
    name = "relsheet",
    version,
    about = "Scrape release-notes tables into Google Sheets"
)]
pub struct CliArgs {
    /// Settings file (TOML); built-in defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // Settings overrides
    /// Spreadsheet document name
    #[arg(long, value_name = "NAME")]
    pub spreadsheet: Option<String>,

    /// Service-account credential file
    #[arg(long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Title of the summary worksheet
    #[arg(long, value_name = "NAME")]
    pub summary_sheet: Option<String>,

    // Scope
    /// Process only the named target group (can be specified multiple times)
    #[arg(long, value_name = "LABEL", action = ArgAction::Append)]
    pub group: Vec<String>,

    /// Skip scraping and only rebuild the summary sheet
    #[arg(long, conflicts_with = "skip_summary")]
    pub summary_only: bool,

    /// Do not rebuild the summary sheet
    #[arg(long)]
    pub skip_summary: bool,

    // General options
    /// Dry run mode - compute merges without writing to the spreadsheet
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Log filter directive matching the verbosity flags
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
