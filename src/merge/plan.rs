//! Pure merge computation

use crate::domain::{parse_release_date, ReleaseEntry, Row};
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;

/// A row whose date column cannot be parsed, which blocks sorting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparsable release date '{value}' for version '{version}'")]
pub struct UnparsableDate {
    /// Version cell of the offending row
    pub version: String,
    /// Raw date cell (empty when the row has no date column)
    pub value: String,
}

/// Result of merging fresh entries into existing sheet rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// Final sheet content
    pub rows: Vec<Row>,
    /// Number of entries new to the sheet
    pub added: usize,
    /// Set when sorting was abandoned because of an unparsable date
    pub sort_error: Option<UnparsableDate>,
    /// Whether `rows` differs from the existing content
    pub changed: bool,
}

impl MergePlan {
    /// Whether the rows were left unsorted
    pub fn sort_degraded(&self) -> bool {
        self.sort_error.is_some()
    }
}

/// Merge `fresh` entries into `existing` rows.
///
/// Existing rows always win: a fresh entry whose version is already present is
/// dropped, as is a fresh entry repeating an earlier fresh version. New rows go
/// first, then existing rows, and the whole set is sorted newest first. Rows
/// without any cells are discarded.
pub fn plan_merge(existing: &[Row], fresh: &[ReleaseEntry]) -> MergePlan {
    let existing_keys: HashSet<&str> = existing
        .iter()
        .filter_map(|row| row.first().map(String::as_str))
        .collect();

    let mut new_keys: HashSet<&str> = HashSet::new();
    let mut rows: Vec<Row> = Vec::with_capacity(existing.len() + fresh.len());
    for entry in fresh {
        let key = entry.version.as_str();
        if existing_keys.contains(key) || !new_keys.insert(key) {
            continue;
        }
        rows.push(entry.to_row());
    }
    let added = rows.len();

    rows.extend(
        existing
            .iter()
            .filter(|row| row.first().is_some_and(|key| !new_keys.contains(key.as_str())))
            .cloned(),
    );

    let sort_error = sort_by_release_date(&mut rows).err();
    let changed = rows.as_slice() != existing;

    MergePlan {
        rows,
        added,
        sort_error,
        changed,
    }
}

/// Stable sort of rows by the date in their second column, newest first.
///
/// If any row's date cannot be parsed the rows are left untouched.
pub fn sort_by_release_date(rows: &mut Vec<Row>) -> Result<(), UnparsableDate> {
    let dates = rows
        .iter()
        .map(|row| {
            let value = row.get(1).map(String::as_str).unwrap_or_default();
            parse_release_date(value).ok_or_else(|| UnparsableDate {
                version: row.first().cloned().unwrap_or_default(),
                value: value.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut keyed: Vec<_> = dates.into_iter().zip(std::mem::take(rows)).collect();
    keyed.sort_by_key(|(date, _)| Reverse(*date));
    *rows = keyed.into_iter().map(|(_, row)| row).collect();
    Ok(())
}
