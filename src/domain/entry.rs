//! Release entry scraped from a documentation table

use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet row as stored remotely
pub type Row = Vec<String>;

/// A released version with its date and optional release-notes link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Version label; identity key within a destination sheet
    pub version: String,
    /// Release date in year-month-day form (`2024-02-03` or `24-02-03`)
    pub release_date: String,
    /// Link to the release notes, when the table provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ReleaseEntry {
    /// Creates an entry without a link
    pub fn new(version: impl Into<String>, release_date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_date: release_date.into(),
            link: None,
        }
    }

    /// Sets the release-notes link (builder pattern)
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Converts the entry into the cell layout used by destination sheets
    pub fn to_row(&self) -> Row {
        let mut row = vec![self.version.clone(), self.release_date.clone()];
        if let Some(link) = &self.link {
            row.push(link.clone());
        }
        row
    }
}

impl fmt::Display for ReleaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.release_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_row_without_link() {
        let entry = ReleaseEntry::new("9.0.000.01", "2024-01-02");
        assert_eq!(entry.to_row(), vec!["9.0.000.01", "2024-01-02"]);
    }

    #[test]
    fn test_to_row_with_link() {
        let entry = ReleaseEntry::new("V1.0", "2024-02-03").with_link("https://docs/rn");
        assert_eq!(entry.to_row(), vec!["V1.0", "2024-02-03", "https://docs/rn"]);
    }

    #[test]
    fn test_display() {
        let entry = ReleaseEntry::new("8.1.2", "2023-05-06");
        assert_eq!(entry.to_string(), "8.1.2 (2023-05-06)");
    }

    #[test]
    fn test_serde_skips_missing_link() {
        let entry = ReleaseEntry::new("8.1.2", "2023-05-06");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("link"));
    }
}
