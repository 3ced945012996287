//! Two-column table parser
//!
//! Pages in this family list releases in the first table on the page: a header
//! row, then one row per release with the version link in the first cell and an
//! `MM/DD/YY` date in the second.

use super::{element_text, selector, ParsedTable, TableParser};
use crate::domain::{ReleaseEntry, SkippedRow, TableFormat, Target};
use crate::error::ParseError;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// CSS locator for the release table
const TABLE_LOCATOR: &str = "table";

/// Release date cell: month, day, two-digit year
static DATE_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap());

/// Parser for version-link / date tables
pub struct TwoColumnTableParser;

impl TwoColumnTableParser {
    /// Convert `MM/DD/YY` into `20YY-MM-DD`
    fn parse_date_cell(raw: &str) -> Option<String> {
        let caps = DATE_CELL_RE.captures(raw)?;
        Some(format!("20{}-{}-{}", &caps[3], &caps[1], &caps[2]))
    }
}

impl TableParser for TwoColumnTableParser {
    fn parse(&self, html: &str, target: &Target) -> Result<ParsedTable, ParseError> {
        let document = Html::parse_document(html);
        let table = document
            .select(&selector(TABLE_LOCATOR))
            .next()
            .ok_or_else(|| ParseError::table_not_found(TABLE_LOCATOR))?;

        let cell_selector = selector("td");
        let link_selector = selector("a");
        let mut parsed = ParsedTable::default();

        // First row is the header
        for row in table.select(&selector("tr")).skip(1) {
            let cells: Vec<_> = row.select(&cell_selector).collect();
            if cells.len() < 2 {
                debug!(target_name = %target.name, "ignoring row with fewer than two cells");
                continue;
            }

            let row_text = element_text(row);
            let Some(link) = cells[0].select(&link_selector).next() else {
                warn!(target_name = %target.name, row = %row_text, "skipping row without version link");
                parsed
                    .skipped
                    .push(SkippedRow::new(row_text, "missing version link"));
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                warn!(target_name = %target.name, row = %row_text, "skipping row without href");
                parsed.skipped.push(SkippedRow::new(row_text, "missing href"));
                continue;
            };

            let version = element_text(link);
            let raw_date = element_text(cells[1]);
            let Some(date) = Self::parse_date_cell(&raw_date) else {
                warn!(target_name = %target.name, date = %raw_date, "skipping row with malformed date");
                parsed.skipped.push(SkippedRow::new(
                    row_text,
                    format!("unrecognized date '{}'", raw_date),
                ));
                continue;
            };

            let entry = ReleaseEntry::new(version, date).with_link(href);
            debug!(target_name = %target.name, %entry, "parsed release row");
            parsed.entries.push(entry);
        }

        Ok(parsed)
    }

    fn format(&self) -> TableFormat {
        TableFormat::TwoColumn
    }
}
