//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One status line per target, colored by outcome
//! - Parser warnings (skipped rows, missing tables, unsorted sheets)
//! - The summary table with today's updates marked
//! - Run totals

use crate::domain::{RunReport, SummaryReport, TargetReport, TargetStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Status label padded for alignment
    fn status_label(&self, status: &TargetStatus) -> String {
        let (label, plain) = match status {
            TargetStatus::Updated { .. } => ("updated".green().bold(), "updated"),
            TargetStatus::Unchanged { .. } => ("ok".dimmed(), "ok"),
            TargetStatus::Failed { .. } => ("FAILED".red().bold(), "FAILED"),
        };
        let padding = " ".repeat(8usize.saturating_sub(plain.len()));
        if self.color {
            format!("{}{}", label, padding)
        } else {
            format!("{}{}", plain, padding)
        }
    }

    /// Notes shown after the status line
    fn target_notes(target: &TargetReport) -> Vec<String> {
        let mut notes = Vec::new();
        if target.table_missing {
            notes.push("release table not found".to_string());
        }
        if target.sort_degraded {
            notes.push("dates unparsable, rows left unsorted".to_string());
        }
        if !target.skipped_rows.is_empty() {
            notes.push(format!("{} row(s) skipped", target.skipped_rows.len()));
        }
        notes
    }

    /// Write the run totals
    fn format_totals(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = if report.dry_run { "(dry-run) " } else { "" };
        let line = format!(
            "{}{} targets: {} updated ({} rows added), {} unchanged, {} failed",
            prefix,
            report.targets.len(),
            report.updated_count(),
            report.total_added(),
            report.unchanged_count(),
            report.failed_count()
        );

        if !self.color {
            return writeln!(writer, "{}", line);
        }
        if report.failed_count() > 0 {
            writeln!(writer, "{}", line.yellow())
        } else {
            writeln!(writer, "{}", line.bold())
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            // Quiet mode: failures and totals only
            for target in report.failures() {
                self.format_target(target, writer)?;
            }
            return self.format_totals(report, writer);
        }

        let mut current_group: Option<&str> = None;
        for target in &report.targets {
            if current_group != Some(target.group.as_str()) {
                let header = format!("{} ({})", target.group, target.format);
                if self.color {
                    writeln!(writer, "{}", header.bold())?;
                } else {
                    writeln!(writer, "{}", header)?;
                }
                current_group = Some(target.group.as_str());
            }
            self.format_target(target, writer)?;
        }
        if !report.targets.is_empty() {
            writeln!(writer)?;
        }

        if let Some(summary) = &report.summary {
            self.format_summary(summary, writer)?;
            writeln!(writer)?;
        }

        self.format_totals(report, writer)
    }

    fn format_target(
        &self,
        target: &TargetReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let status = self.status_label(&target.status);
        let detail = match &target.status {
            TargetStatus::Updated { added, total } => {
                format!("{} added, {} rows", added, total)
            }
            TargetStatus::Unchanged { total } => format!("{} rows", total),
            TargetStatus::Failed { message } => message.clone(),
        };

        let notes = Self::target_notes(target);
        let notes = if notes.is_empty() {
            String::new()
        } else if self.color {
            format!(" ({})", notes.join("; ")).yellow().to_string()
        } else {
            format!(" ({})", notes.join("; "))
        };

        writeln!(
            writer,
            "  {} {:24} {:12} {}{}",
            status, target.name, target.worksheet, detail, notes
        )?;

        if self.verbosity == Verbosity::Verbose {
            for skipped in &target.skipped_rows {
                let line = format!("      skipped '{}': {}", skipped.text, skipped.reason);
                if self.color {
                    writeln!(writer, "{}", line.dimmed())?;
                } else {
                    writeln!(writer, "{}", line)?;
                }
            }
        }
        Ok(())
    }

    fn format_summary(
        &self,
        summary: &SummaryReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let title = if summary.written {
            "Summary"
        } else {
            "Summary (not written)"
        };
        if self.color {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }

        if let Some(error) = &summary.error {
            let line = format!("  error: {}", error);
            if self.color {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }

        for row in &summary.rows {
            let marker = if row.updated_today { " ✅" } else { "" };
            let line = format!("  {:16} {:24} {}{}", row.component, row.version, row.date, marker);
            if self.color && row.updated_today {
                writeln!(writer, "{}", line.on_bright_yellow().black())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            for (sheet, error) in &summary.skipped_sheets {
                writeln!(writer, "  skipped sheet {}: {}", sheet, error)?;
            }
        }

        writeln!(
            writer,
            "  {} component(s), {} updated today",
            summary.rows.len(),
            summary.updated_today_count()
        )
    }
}
