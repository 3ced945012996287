//! In-memory spreadsheet backend

use super::{Color, SheetBackend};
use crate::domain::Row;
use crate::error::SheetError;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct Worksheet {
    title: String,
    rows: Vec<Row>,
    highlighted: BTreeSet<usize>,
    writes: usize,
}

/// Spreadsheet held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySheets {
    sheets: Mutex<Vec<Worksheet>>,
    unreadable: HashSet<String>,
}

impl MemorySheets {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worksheet with initial rows (builder pattern)
    pub fn with_sheet(self, title: impl Into<String>, rows: Vec<Row>) -> Self {
        self.lock().push(Worksheet {
            title: title.into(),
            rows,
            ..Worksheet::default()
        });
        self
    }

    /// Make every read of `title` fail (builder pattern)
    pub fn with_unreadable_sheet(mut self, title: impl Into<String>) -> Self {
        self.unreadable.insert(title.into());
        self
    }

    /// Current rows of a worksheet
    pub fn rows(&self, title: &str) -> Option<Vec<Row>> {
        self.lock()
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.rows.clone())
    }

    /// Number of write operations (`write_rows` and `append_rows`) on a worksheet
    pub fn write_count(&self, title: &str) -> usize {
        self.lock()
            .iter()
            .find(|s| s.title == title)
            .map_or(0, |s| s.writes)
    }

    /// Highlighted row numbers of a worksheet
    pub fn highlighted(&self, title: &str) -> Vec<usize> {
        self.lock()
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.highlighted.iter().copied().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Worksheet>> {
        // A poisoned lock only means a test panicked mid-write
        self.sheets.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_sheet_mut<T>(
        &self,
        title: &str,
        f: impl FnOnce(&mut Worksheet) -> T,
    ) -> Result<T, SheetError> {
        let mut sheets = self.lock();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.title == title)
            .ok_or_else(|| SheetError::worksheet_not_found(title))?;
        Ok(f(sheet))
    }

    fn check_readable(&self, title: &str) -> Result<(), SheetError> {
        if self.unreadable.contains(title) {
            return Err(SheetError::request_failed(
                "read",
                format!("worksheet '{}' is unreadable", title),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for MemorySheets {
    async fn worksheet_titles(&self) -> Result<Vec<String>, SheetError> {
        Ok(self.lock().iter().map(|s| s.title.clone()).collect())
    }

    async fn read_all(&self, title: &str) -> Result<Vec<Row>, SheetError> {
        self.check_readable(title)?;
        self.with_sheet_mut(title, |s| s.rows.clone())
    }

    async fn read_row(&self, title: &str, row: usize) -> Result<Row, SheetError> {
        self.check_readable(title)?;
        self.with_sheet_mut(title, |s| {
            row.checked_sub(1)
                .and_then(|i| s.rows.get(i))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn clear(&self, title: &str) -> Result<(), SheetError> {
        self.with_sheet_mut(title, |s| s.rows.clear())
    }

    async fn write_rows(
        &self,
        title: &str,
        start_row: usize,
        rows: &[Row],
    ) -> Result<(), SheetError> {
        let offset = start_row.max(1) - 1;
        self.with_sheet_mut(title, |s| {
            if s.rows.len() < offset + rows.len() {
                s.rows.resize(offset + rows.len(), Row::new());
            }
            for (i, row) in rows.iter().enumerate() {
                s.rows[offset + i] = row.clone();
            }
            s.writes += 1;
        })
    }

    async fn append_rows(&self, title: &str, rows: &[Row]) -> Result<(), SheetError> {
        self.with_sheet_mut(title, |s| {
            while s.rows.last().is_some_and(|r| r.is_empty()) {
                s.rows.pop();
            }
            s.rows.extend(rows.iter().cloned());
            s.writes += 1;
        })
    }

    async fn ensure_worksheet(&self, title: &str) -> Result<bool, SheetError> {
        let mut sheets = self.lock();
        if sheets.iter().any(|s| s.title == title) {
            return Ok(false);
        }
        sheets.push(Worksheet {
            title: title.to_string(),
            ..Worksheet::default()
        });
        Ok(true)
    }

    async fn highlight_rows(
        &self,
        title: &str,
        rows: &[usize],
        _columns: usize,
        _color: Color,
    ) -> Result<(), SheetError> {
        self.with_sheet_mut(title, |s| s.highlighted.extend(rows.iter().copied()))
    }

    async fn reset_backgrounds(&self, title: &str) -> Result<(), SheetError> {
        self.with_sheet_mut(title, |s| s.highlighted.clear())
    }
}
