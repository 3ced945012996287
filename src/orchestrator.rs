//! Run orchestrator coordinating the whole scrape workflow
//!
//! This module provides:
//! - Workflow coordination: fetch → parse → reconcile → summarize
//! - Per-target failure isolation
//! - Dry-run, summary-only and skip-summary modes

use crate::cli::CliArgs;
use crate::domain::{
    RunReport, SummaryReport, Target, TargetGroup, TargetReport, TargetStatus, DATE_FORMAT,
};
use crate::merge::Reconciler;
use crate::progress::Progress;
use crate::sheets::SheetBackend;
use crate::source::{fetch_table, PageSource};
use crate::summarizer::Summarizer;
use chrono::{Local, NaiveDate};
use tracing::{error, info};

/// Flags that change what a run does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute everything but write nothing
    pub dry_run: bool,
    /// Skip scraping, only rebuild the summary
    pub summary_only: bool,
    /// Do not rebuild the summary
    pub skip_summary: bool,
    /// Show spinners on stderr
    pub show_progress: bool,
}

impl RunOptions {
    /// Build run options from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            dry_run: args.dry_run,
            summary_only: args.summary_only,
            skip_summary: args.skip_summary,
            show_progress: !args.quiet && !args.json,
        }
    }
}

/// Orchestrator for one scrape run
pub struct Orchestrator<'a> {
    /// Where documentation pages come from
    pages: &'a dyn PageSource,
    /// Destination spreadsheet
    sheets: &'a dyn SheetBackend,
    /// Title of the summary worksheet
    summary_sheet: String,
    options: RunOptions,
    /// Date used to flag today's updates
    today: NaiveDate,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with default options, dated today
    pub fn new(
        pages: &'a dyn PageSource,
        sheets: &'a dyn SheetBackend,
        summary_sheet: impl Into<String>,
    ) -> Self {
        Self {
            pages,
            sheets,
            summary_sheet: summary_sheet.into(),
            options: RunOptions::default(),
            today: Local::now().date_naive(),
        }
    }

    /// Set run options (builder pattern)
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the run date (builder pattern)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Process every target of every group, then rebuild the summary
    pub async fn run(&self, groups: &[(TargetGroup, Vec<Target>)]) -> RunReport {
        let mut progress = Progress::new(self.options.show_progress);
        let mut report = RunReport::new(self.options.dry_run);

        if !self.options.summary_only {
            for (group, targets) in groups {
                info!(group = %group.label, format = %group.format, targets = targets.len(), "processing group");
                progress.start_group(&group.label, targets.len());

                for target in targets {
                    progress.target_started(&target.name);
                    report.add_target(self.process_target(group, target).await);
                    progress.target_finished();
                }
                progress.clear();
            }
        }

        if !self.options.skip_summary {
            progress.spinner("Rebuilding summary...");
            report.summary = Some(self.summarize().await);
            progress.clear();
        }

        report
    }

    /// Fetch, parse and reconcile a single target; never fails the run
    async fn process_target(&self, group: &TargetGroup, target: &Target) -> TargetReport {
        let parsed = match fetch_table(self.pages, target, group.format).await {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(target_name = %target.name, error = %e, "page fetch failed");
                return TargetReport::failed(
                    &target.name,
                    &target.worksheet,
                    &group.label,
                    group.format,
                    e.to_string(),
                );
            }
        };

        let reconciler = Reconciler::new(self.sheets, self.options.dry_run);
        let outcome = reconciler
            .reconcile(&parsed.entries, &target.worksheet)
            .await;
        let (status, sort_degraded) = match outcome {
            Ok(outcome) if outcome.changed => (
                TargetStatus::Updated {
                    added: outcome.added,
                    total: outcome.total,
                },
                outcome.sort_degraded,
            ),
            Ok(outcome) => (
                TargetStatus::Unchanged {
                    total: outcome.total,
                },
                outcome.sort_degraded,
            ),
            Err(e) => {
                error!(target_name = %target.name, worksheet = %target.worksheet, error = %e, "sheet update failed");
                (
                    TargetStatus::Failed {
                        message: e.to_string(),
                    },
                    false,
                )
            }
        };

        TargetReport {
            name: target.name.clone(),
            worksheet: target.worksheet.clone(),
            group: group.label.clone(),
            format: group.format,
            status,
            skipped_rows: parsed.skipped,
            table_missing: parsed.table_missing,
            sort_degraded,
        }
    }

    /// Gather the summary and write it unless this is a dry run
    async fn summarize(&self) -> SummaryReport {
        let today = self.today.format(DATE_FORMAT).to_string();
        let summarizer = Summarizer::new(self.sheets, &self.summary_sheet);

        let mut summary = match summarizer.gather(&today).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, "summary scan failed");
                return SummaryReport {
                    error: Some(e.to_string()),
                    ..SummaryReport::default()
                };
            }
        };

        if self.options.dry_run {
            info!(components = summary.rows.len(), "dry run, summary not written");
            return summary;
        }

        if let Err(e) = summarizer.write(&mut summary).await {
            error!(error = %e, "summary write failed");
            summary.error = Some(e.to_string());
        }
        summary
    }
}
