//! Summary sheet rows

use super::Row;
use serde::{Deserialize, Serialize};

/// Header row written at the top of the summary sheet
pub const SUMMARY_HEADER: [&str; 4] = ["Component", "Version", "Date", "Updated Today?"];

/// Marker written in the last column for rows updated today
const TODAY_MARKER: &str = "✅";

/// Latest entry of one destination sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Worksheet title
    pub component: String,
    /// Version from the first row
    pub version: String,
    /// Date from the first row, as stored
    pub date: String,
    /// Whether the date equals the run date
    pub updated_today: bool,
}

impl SummaryRow {
    /// Build a summary row, flagging it when `date` equals `today`
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
        today: &str,
    ) -> Self {
        let date = date.into();
        Self {
            component: component.into(),
            version: version.into(),
            updated_today: date == today,
            date,
        }
    }

    /// Converts the row into summary sheet cells
    pub fn to_row(&self) -> Row {
        vec![
            self.component.clone(),
            self.version.clone(),
            self.date.clone(),
            if self.updated_today {
                TODAY_MARKER.to_string()
            } else {
                String::new()
            },
        ]
    }
}

/// Result of scanning destination sheets for the summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Rows sorted by date, newest first
    pub rows: Vec<SummaryRow>,
    /// Worksheets that could not be read, with the error message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_sheets: Vec<(String, String)>,
    /// Whether the summary sheet was rewritten
    pub written: bool,
    /// Error raised while writing the summary sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryReport {
    /// Number of components updated today
    pub fn updated_today_count(&self) -> usize {
        self.rows.iter().filter(|r| r.updated_today).count()
    }

    /// Full sheet content: header followed by the rows
    pub fn to_rows(&self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(SUMMARY_HEADER.iter().map(|s| s.to_string()).collect());
        rows.extend(self.rows.iter().map(SummaryRow::to_row));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_today_flag() {
        let row = SummaryRow::new("SIP", "9.0.1", "2024-05-01", "2024-05-01");
        assert!(row.updated_today);

        let row = SummaryRow::new("SIP", "9.0.1", "2024-04-30", "2024-05-01");
        assert!(!row.updated_today);
    }

    #[test]
    fn test_to_row_marker() {
        let row = SummaryRow::new("SIP", "9.0.1", "2024-05-01", "2024-05-01");
        assert_eq!(row.to_row(), vec!["SIP", "9.0.1", "2024-05-01", "✅"]);

        let row = SummaryRow::new("SIP", "9.0.1", "2024-04-30", "2024-05-01");
        assert_eq!(row.to_row()[3], "");
    }

    #[test]
    fn test_to_rows_includes_header() {
        let report = SummaryReport {
            rows: vec![SummaryRow::new("A", "1", "2024-01-01", "2024-01-01")],
            ..Default::default()
        };
        let rows = report.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Component", "Version", "Date", "Updated Today?"]);
        assert_eq!(report.updated_today_count(), 1);
    }
}
