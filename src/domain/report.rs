//! Run report types
//!
//! Provides structures for tracking outcomes at target and overall levels.

use super::{SummaryReport, TableFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A table row the parser could not turn into an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Raw text of the offending row or link
    pub text: String,
    /// Why it was rejected
    pub reason: String,
}

impl SkippedRow {
    /// Creates a new skipped row record
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Final state of a single target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetStatus {
    /// Sheet content changed and was rewritten (or would be, in dry-run)
    Updated {
        /// Rows new to the sheet
        added: usize,
        /// Rows in the sheet after the write
        total: usize,
    },
    /// Sheet already matched the merged content
    Unchanged {
        /// Rows in the sheet
        total: usize,
    },
    /// Target could not be processed
    Failed {
        /// Error message
        message: String,
    },
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::Updated { added, total } => {
                write!(f, "{} added, {} rows", added, total)
            }
            TargetStatus::Unchanged { total } => write!(f, "unchanged, {} rows", total),
            TargetStatus::Failed { message } => write!(f, "failed: {}", message),
        }
    }
}

/// Outcome of processing one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Target name
    pub name: String,
    /// Destination worksheet
    pub worksheet: String,
    /// Release-track label of the group the target came from
    pub group: String,
    /// Table format used to parse the page
    pub format: TableFormat,
    /// Final state
    #[serde(flatten)]
    pub status: TargetStatus,
    /// Rows dropped by the parser
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
    /// The page answered an error status or had no release table
    #[serde(default)]
    pub table_missing: bool,
    /// Dates could not all be parsed, rows were written unsorted
    #[serde(default)]
    pub sort_degraded: bool,
}

impl TargetReport {
    /// Creates a report for a target that failed outright
    pub fn failed(
        name: impl Into<String>,
        worksheet: impl Into<String>,
        group: impl Into<String>,
        format: TableFormat,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            worksheet: worksheet.into(),
            group: group.into(),
            format,
            status: TargetStatus::Failed {
                message: message.into(),
            },
            skipped_rows: Vec::new(),
            table_missing: false,
            sort_degraded: false,
        }
    }

    /// Returns true if the sheet content changed
    pub fn is_updated(&self) -> bool {
        matches!(self.status, TargetStatus::Updated { .. })
    }

    /// Returns true if the target failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, TargetStatus::Failed { .. })
    }

    /// Number of rows new to the sheet
    pub fn added(&self) -> usize {
        match self.status {
            TargetStatus::Updated { added, .. } => added,
            _ => 0,
        }
    }
}

/// Overall outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Whether this was a dry run
    pub dry_run: bool,
    /// One entry per processed target, in processing order
    pub targets: Vec<TargetReport>,
    /// Summary outcome, absent when the summary step was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryReport>,
}

impl RunReport {
    /// Creates an empty report
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            targets: Vec::new(),
            summary: None,
        }
    }

    /// Adds a target outcome
    pub fn add_target(&mut self, target: TargetReport) {
        self.targets.push(target);
    }

    /// Number of targets whose sheet changed
    pub fn updated_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_updated()).count()
    }

    /// Number of targets already up to date
    pub fn unchanged_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Unchanged { .. }))
            .count()
    }

    /// Number of failed targets
    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_failed()).count()
    }

    /// Total rows added across all targets
    pub fn total_added(&self) -> usize {
        self.targets.iter().map(|t| t.added()).sum()
    }

    /// Total rows dropped by parsers
    pub fn total_skipped_rows(&self) -> usize {
        self.targets.iter().map(|t| t.skipped_rows.len()).sum()
    }

    /// Returns all failed targets
    pub fn failures(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(|t| t.is_failed())
    }
}
