//! Summary sheet builder
//!
//! This module provides:
//! - Collection of the latest entry of every destination sheet
//! - Rewriting of the summary sheet with today's updates highlighted

use crate::domain::{SummaryReport, SummaryRow, SUMMARY_HEADER};
use crate::error::SheetError;
use crate::sheets::{Color, SheetBackend};
use tracing::{debug, info, warn};

/// Builds the summary sheet from the first row of every other sheet
pub struct Summarizer<'a> {
    sheets: &'a dyn SheetBackend,
    /// Title of the summary worksheet, excluded from the scan
    summary_sheet: String,
}

impl<'a> Summarizer<'a> {
    /// Create a new Summarizer
    pub fn new(sheets: &'a dyn SheetBackend, summary_sheet: impl Into<String>) -> Self {
        Self {
            sheets,
            summary_sheet: summary_sheet.into(),
        }
    }

    /// Read row 1 of every destination sheet.
    ///
    /// `today` is the run date formatted as `YYYY-MM-DD`. Sheets that fail to
    /// read are recorded in `skipped_sheets`; sheets whose first row has fewer
    /// than two cells are ignored.
    pub async fn gather(&self, today: &str) -> Result<SummaryReport, SheetError> {
        let mut report = SummaryReport::default();

        for title in self.sheets.worksheet_titles().await? {
            if title == self.summary_sheet {
                continue;
            }

            match self.sheets.read_row(&title, 1).await {
                Ok(row) if row.len() >= 2 => {
                    report
                        .rows
                        .push(SummaryRow::new(title, row[0].clone(), row[1].clone(), today));
                }
                Ok(_) => debug!(worksheet = %title, "no latest entry"),
                Err(e) => {
                    warn!(worksheet = %title, error = %e, "could not read sheet");
                    report.skipped_sheets.push((title, e.to_string()));
                }
            }
        }

        // Raw string comparison, so mixed date formats order lexicographically
        report.rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(report)
    }

    /// Replace the summary sheet with the gathered rows
    pub async fn write(&self, report: &mut SummaryReport) -> Result<(), SheetError> {
        let title = self.summary_sheet.as_str();

        if self.sheets.ensure_worksheet(title).await? {
            info!(worksheet = title, "created summary sheet");
        } else {
            self.sheets.clear(title).await?;
        }
        self.sheets.reset_backgrounds(title).await?;
        self.sheets.append_rows(title, &report.to_rows()).await?;

        // Row 1 is the header
        let highlighted: Vec<usize> = report
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.updated_today)
            .map(|(i, _)| i + 2)
            .collect();
        if !highlighted.is_empty() {
            debug!(rows = ?highlighted, "highlighting today's updates");
            self.sheets
                .highlight_rows(title, &highlighted, SUMMARY_HEADER.len(), Color::HIGHLIGHT)
                .await?;
        }

        report.written = true;
        info!(
            worksheet = title,
            components = report.rows.len(),
            updated_today = highlighted.len(),
            "summary written"
        );
        Ok(())
    }

    /// Gather and write in one step
    pub async fn run(&self, today: &str) -> Result<SummaryReport, SheetError> {
        let mut report = self.gather(today).await?;
        self.write(&mut report).await?;
        Ok(report)
    }
}
