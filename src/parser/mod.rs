//! Release table parsers for the supported documentation formats
//!
//! This module provides parsers for:
//! - Bracketed link tables (`table.os-table`, `NAME[MM/DD/YY]`)
//! - Two-column tables (version link, `MM/DD/YY` date)

mod bracketed;
mod two_column;

pub use bracketed::BracketedTableParser;
pub use two_column::TwoColumnTableParser;

use crate::domain::{ReleaseEntry, SkippedRow, TableFormat, Target};
use crate::error::ParseError;
use scraper::{ElementRef, Selector};

/// Entries extracted from one page, plus the rows that were rejected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Parsed entries in page order
    pub entries: Vec<ReleaseEntry>,
    /// Rows that looked like releases but could not be parsed
    pub skipped: Vec<SkippedRow>,
    /// The page had no release table at all
    pub table_missing: bool,
}

impl ParsedTable {
    /// Result used when the page has no release table
    pub fn missing() -> Self {
        Self {
            table_missing: true,
            ..Self::default()
        }
    }
}

/// Trait for extracting release entries from an HTML page
pub trait TableParser {
    /// Parse the release table out of `html`
    fn parse(&self, html: &str, target: &Target) -> Result<ParsedTable, ParseError>;

    /// Returns the format this parser handles
    fn format(&self) -> TableFormat;
}

/// Get a table parser for the specified format
pub fn get_parser(format: TableFormat) -> Box<dyn TableParser> {
    match format {
        TableFormat::Bracketed => Box::new(BracketedTableParser),
        TableFormat::TwoColumn => Box::new(TwoColumnTableParser),
    }
}

/// Build a selector from a constant CSS expression
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Element text with every text node trimmed and concatenated
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
