//! Spreadsheet backends
//!
//! This module provides:
//! - The `SheetBackend` trait consumed by the merge and summary steps
//! - Google Sheets implementation authenticated with a service account
//! - In-memory implementation for dry runs against fixtures and for tests

mod auth;
mod google;
mod memory;

pub use auth::{ServiceAccountKey, SHEETS_SCOPES};
pub use google::GoogleSheets;
pub use memory::MemorySheets;

use crate::domain::Row;
use crate::error::SheetError;
use async_trait::async_trait;

/// Background color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    /// Pale yellow used for rows updated today
    pub const HIGHLIGHT: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 0.6,
    };
}

/// Operations the pipeline needs from a spreadsheet document.
///
/// Row numbers are 1-based, as in A1 notation.
#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Titles of every worksheet, in document order
    async fn worksheet_titles(&self) -> Result<Vec<String>, SheetError>;

    /// All non-empty rows of a worksheet
    async fn read_all(&self, title: &str) -> Result<Vec<Row>, SheetError>;

    /// A single row; empty when the row has no values
    async fn read_row(&self, title: &str, row: usize) -> Result<Row, SheetError>;

    /// Remove every value from a worksheet
    async fn clear(&self, title: &str) -> Result<(), SheetError>;

    /// Write `rows` starting at the `A{start_row}` cell
    async fn write_rows(&self, title: &str, start_row: usize, rows: &[Row])
        -> Result<(), SheetError>;

    /// Append `rows` after the last row holding values
    async fn append_rows(&self, title: &str, rows: &[Row]) -> Result<(), SheetError>;

    /// Create the worksheet if it does not exist; returns true when created
    async fn ensure_worksheet(&self, title: &str) -> Result<bool, SheetError>;

    /// Paint columns `A..` (`columns` wide) of each listed row
    async fn highlight_rows(
        &self,
        title: &str,
        rows: &[usize],
        columns: usize,
        color: Color,
    ) -> Result<(), SheetError>;

    /// Remove background colors from the whole worksheet
    async fn reset_backgrounds(&self, title: &str) -> Result<(), SheetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_color() {
        assert_eq!(Color::HIGHLIGHT.red, 1.0);
        assert_eq!(Color::HIGHLIGHT.blue, 0.6);
    }
}
