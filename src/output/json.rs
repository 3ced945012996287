//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Aggregate counts alongside per-target details

use crate::domain::{RunReport, SummaryReport, TargetReport};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Drop per-row parser details unless verbose
    fn target_view(&self, target: &TargetReport) -> TargetReport {
        let mut target = target.clone();
        if self.verbosity != Verbosity::Verbose {
            target.skipped_rows.clear();
        }
        target
    }

    fn write_json<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Aggregate counts
    totals: JsonTotals,
    /// Per-target results
    targets: Vec<TargetReport>,
    /// Summary outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SummaryReport>,
}

/// JSON representation of aggregate counts
#[derive(Serialize)]
struct JsonTotals {
    updated: usize,
    unchanged: usize,
    failed: usize,
    rows_added: usize,
    rows_skipped: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dry_run: report.dry_run,
            totals: JsonTotals {
                updated: report.updated_count(),
                unchanged: report.unchanged_count(),
                failed: report.failed_count(),
                rows_added: report.total_added(),
                rows_skipped: report.total_skipped_rows(),
            },
            targets: report.targets.iter().map(|t| self.target_view(t)).collect(),
            summary: report.summary.as_ref(),
        };
        self.write_json(&output, writer)
    }

    fn format_target(
        &self,
        target: &TargetReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write_json(&self.target_view(target), writer)
    }

    fn format_summary(
        &self,
        summary: &SummaryReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write_json(summary, writer)
    }
}
