//! Scrape targets and the documentation table formats they use

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Worksheet whose bracketed dates keep their two-digit year
pub const ICON_WORKSHEET: &str = "ICON";

/// HTML table conventions used by the documentation families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableFormat {
    /// `table.os-table` whose links read `NAME[MM/DD/YY]`
    Bracketed,
    /// First table on the page: version link in column one, `MM/DD/YY` in column two
    TwoColumn,
}

impl TableFormat {
    /// Returns the display name for this format
    pub fn display_name(&self) -> &'static str {
        match self {
            TableFormat::Bracketed => "bracketed",
            TableFormat::TwoColumn => "two-column",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One tracked component: where to scrape it and which worksheet receives it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Component name used in logs and the report
    pub name: String,
    /// Documentation page URL
    pub url: String,
    /// Destination worksheet title
    pub worksheet: String,
    /// Keep two-digit years verbatim; defaults to true only for the icon worksheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_year: Option<bool>,
}

impl Target {
    /// Creates a new target
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            worksheet: worksheet.into(),
            short_year: None,
        }
    }

    /// Whether bracketed dates for this target keep their two-digit year
    pub fn keeps_short_year(&self) -> bool {
        self.short_year
            .unwrap_or_else(|| self.worksheet == ICON_WORKSHEET)
    }
}

/// A list of targets published in the same table format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    /// Release-track label (e.g. "8.1")
    pub label: String,
    /// Table format shared by every target in the list
    pub format: TableFormat,
    /// JSON file holding the target array
    pub path: PathBuf,
}

impl TargetGroup {
    /// Creates a new target group
    pub fn new(label: impl Into<String>, format: TableFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            format,
            path: path.into(),
        }
    }
}
