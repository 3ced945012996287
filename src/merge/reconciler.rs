//! Sheet reconciliation
//!
//! Reads the destination sheet, merges fresh entries into it and replaces the
//! whole sheet only when the merged content differs.

use super::{plan_merge, MergePlan};
use crate::domain::ReleaseEntry;
use crate::error::SheetError;
use crate::sheets::SheetBackend;
use tracing::{info, warn};

/// Result of reconciling one destination sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Destination worksheet
    pub worksheet: String,
    /// Rows new to the sheet
    pub added: usize,
    /// Rows after the merge
    pub total: usize,
    /// Merged content differs from what was stored
    pub changed: bool,
    /// The sheet was actually rewritten (false in dry-run)
    pub written: bool,
    /// Rows were left unsorted because a date could not be parsed
    pub sort_degraded: bool,
}

/// Applies merge plans to destination sheets
pub struct Reconciler<'a> {
    sheets: &'a dyn SheetBackend,
    /// Whether to run in dry-run mode (no sheet modifications)
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    /// Create a new Reconciler
    pub fn new(sheets: &'a dyn SheetBackend, dry_run: bool) -> Self {
        Self { sheets, dry_run }
    }

    /// Merge `fresh` into `worksheet` and rewrite it if the content changed
    pub async fn reconcile(
        &self,
        fresh: &[ReleaseEntry],
        worksheet: &str,
    ) -> Result<ReconcileOutcome, SheetError> {
        let existing = self.sheets.read_all(worksheet).await?;
        let plan = plan_merge(&existing, fresh);

        if let Some(e) = &plan.sort_error {
            warn!(worksheet, error = %e, "date parsing failed, keeping rows unsorted");
        }

        let written = if plan.changed && !self.dry_run {
            self.sheets.clear(worksheet).await?;
            self.sheets.write_rows(worksheet, 1, &plan.rows).await?;
            true
        } else {
            false
        };

        if plan.changed {
            info!(
                worksheet,
                added = plan.added,
                dry_run = self.dry_run,
                "rows added or re-sorted"
            );
        } else {
            info!(worksheet, "no changes");
        }

        Ok(Self::outcome(worksheet, &plan, written))
    }

    fn outcome(worksheet: &str, plan: &MergePlan, written: bool) -> ReconcileOutcome {
        ReconcileOutcome {
            worksheet: worksheet.to_string(),
            added: plan.added,
            total: plan.rows.len(),
            changed: plan.changed,
            written,
            sort_degraded: plan.sort_degraded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Row;
    use crate::sheets::MemorySheets;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_reconcile_writes_once() {
        let sheets = MemorySheets::new().with_sheet("SIP", vec![row(&["v1", "2024-01-01"])]);
        let fresh = vec![
            ReleaseEntry::new("v2", "2024-02-01"),
            ReleaseEntry::new("v1", "2024-01-01"),
        ];
        let reconciler = Reconciler::new(&sheets, false);

        let outcome = reconciler.reconcile(&fresh, "SIP").await.unwrap();
        assert!(outcome.written);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.total, 2);
        assert_eq!(
            sheets.rows("SIP").unwrap(),
            vec![row(&["v2", "2024-02-01"]), row(&["v1", "2024-01-01"])]
        );
        assert_eq!(sheets.write_count("SIP"), 1);

        let again = reconciler.reconcile(&fresh, "SIP").await.unwrap();
        assert!(!again.changed);
        assert!(!again.written);
        assert_eq!(sheets.write_count("SIP"), 1);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let sheets = MemorySheets::new().with_sheet("SIP", vec![]);
        let reconciler = Reconciler::new(&sheets, true);

        let outcome = reconciler
            .reconcile(&[ReleaseEntry::new("v1", "2024-01-01")], "SIP")
            .await
            .unwrap();
        assert!(outcome.changed);
        assert!(!outcome.written);
        assert!(sheets.rows("SIP").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_degraded_sort_still_written() {
        let sheets = MemorySheets::new().with_sheet("ICON", vec![row(&["x", "n/a"])]);
        let reconciler = Reconciler::new(&sheets, false);
        let outcome = reconciler
            .reconcile(&[ReleaseEntry::new("y", "24-01-02")], "ICON")
            .await
            .unwrap();
        assert!(outcome.sort_degraded);
        assert_eq!(
            sheets.rows("ICON").unwrap(),
            vec![row(&["y", "24-01-02"]), row(&["x", "n/a"])]
        );
    }

    #[tokio::test]
    async fn test_missing_worksheet_is_error() {
        let sheets = MemorySheets::new();
        let reconciler = Reconciler::new(&sheets, false);
        let result = reconciler.reconcile(&[], "NOPE").await;
        assert!(matches!(result, Err(SheetError::WorksheetNotFound { .. })));
    }
}
