//! Bracketed link table parser
//!
//! Pages in this family keep their releases in a `table.os-table` where each
//! release is a link reading `NAME[MM/DD/YY]`, for example `9.0.000.12[01/02/23]`.

use super::{element_text, selector, ParsedTable, TableParser};
use crate::domain::{ReleaseEntry, SkippedRow, TableFormat, Target};
use crate::error::ParseError;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// CSS locator for the release table
const TABLE_LOCATOR: &str = "table.os-table";

/// Bracketed date: month, day, two- or four-digit year
static BRACKET_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").unwrap());

/// Parser for `NAME[MM/DD/YY]` link tables
pub struct BracketedTableParser;

impl BracketedTableParser {
    /// Split a link text into version and formatted date.
    ///
    /// Returns `Ok(None)` when the text carries no brackets at all, and an
    /// error message when it does but does not follow the grammar.
    fn parse_link_text(text: &str, short_year: bool) -> Result<Option<ReleaseEntry>, String> {
        let Some((head, rest)) = text.split_once('[') else {
            return Ok(None);
        };
        if !rest.contains(']') {
            return Ok(None);
        }
        let raw_date = rest.split(']').next().unwrap_or_default().trim();
        let version = head.trim();
        if version.is_empty() {
            return Err("missing version before '['".to_string());
        }

        let caps = BRACKET_DATE_RE
            .captures(raw_date)
            .ok_or_else(|| format!("unrecognized date '{}'", raw_date))?;
        let (mm, dd, yy) = (&caps[1], &caps[2], &caps[3]);

        let date = if short_year || yy.len() == 4 {
            format!("{}-{}-{}", yy, mm, dd)
        } else {
            format!("20{}-{}-{}", yy, mm, dd)
        };

        Ok(Some(ReleaseEntry::new(version, date)))
    }
}

impl TableParser for BracketedTableParser {
    fn parse(&self, html: &str, target: &Target) -> Result<ParsedTable, ParseError> {
        let document = Html::parse_document(html);
        let table = document
            .select(&selector(TABLE_LOCATOR))
            .next()
            .ok_or_else(|| ParseError::table_not_found(TABLE_LOCATOR))?;

        let short_year = target.keeps_short_year();
        let mut parsed = ParsedTable::default();

        for link in table.select(&selector("a")) {
            let text = element_text(link);
            match Self::parse_link_text(&text, short_year) {
                Ok(Some(entry)) => {
                    debug!(target_name = %target.name, %entry, "parsed release link");
                    parsed.entries.push(entry);
                }
                Ok(None) => {}
                Err(reason) => {
                    warn!(target_name = %target.name, text = %text, %reason, "skipping release link");
                    parsed.skipped.push(SkippedRow::new(text, reason));
                }
            }
        }

        Ok(parsed)
    }

    fn format(&self) -> TableFormat {
        TableFormat::Bracketed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(worksheet: &str) -> Target {
        Target::new("Component", "https://docs.example.com/rn", worksheet)
    }

    fn page(links: &[&str]) -> String {
        let cells: String = links
            .iter()
            .map(|l| format!("<tr><td><a href=\"#\">{}</a></td></tr>", l))
            .collect();
        format!(
            "<html><body><table class=\"nav\"><tr><td><a>1.0[01/01/20]</a></td></tr></table>\
             <table class=\"os-table\">{}</table></body></html>",
            cells
        )
    }

    #[test]
    fn test_expands_two_digit_year() {
        let parsed = BracketedTableParser
            .parse(&page(&["X[01/02/23]"]), &target("SIP"))
            .unwrap();
        assert_eq!(parsed.entries, vec![ReleaseEntry::new("X", "2023-01-02")]);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_icon_keeps_two_digit_year() {
        let parsed = BracketedTableParser
            .parse(&page(&["X[01/02/23]"]), &target("ICON"))
            .unwrap();
        assert_eq!(parsed.entries, vec![ReleaseEntry::new("X", "23-01-02")]);
    }

    #[test]
    fn test_four_digit_year_kept() {
        let parsed = BracketedTableParser
            .parse(&page(&["9.0.1 [12/31/2024]"]), &target("SIP"))
            .unwrap();
        assert_eq!(parsed.entries, vec![ReleaseEntry::new("9.0.1", "2024-12-31")]);
    }

    #[test]
    fn test_only_os_table_is_scanned() {
        let parsed = BracketedTableParser
            .parse(&page(&["A[03/04/24]", "B[05/06/24]"]), &target("SIP"))
            .unwrap();
        let versions: Vec<_> = parsed.entries.iter().map(|e| e.version.as_str()).collect();
        assert_eq!(versions, vec!["A", "B"]);
    }

    #[test]
    fn test_links_without_brackets_ignored() {
        let parsed = BracketedTableParser
            .parse(&page(&["Release notes", "A[03/04/24]"]), &target("SIP"))
            .unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_malformed_date_skipped() {
        let parsed = BracketedTableParser
            .parse(&page(&["A[TBD]", "B[1/2]", "C[03/04/24]"]), &target("SIP"))
            .unwrap();
        assert_eq!(parsed.entries, vec![ReleaseEntry::new("C", "2024-03-04")]);
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].text, "A[TBD]");
    }

    #[test]
    fn test_link_text_split_across_nodes() {
        let html = "<table class=\"os-table\"><tr><td>\
                    <a href=\"#\"><span>9.0.2</span> <em>[07/08/24]</em></a></td></tr></table>";
        let parsed = BracketedTableParser.parse(html, &target("SIP")).unwrap();
        assert_eq!(parsed.entries, vec![ReleaseEntry::new("9.0.2", "2024-07-08")]);
    }

    #[test]
    fn test_missing_table() {
        let err = BracketedTableParser
            .parse("<html><table><tr><td>x</td></tr></table></html>", &target("SIP"))
            .unwrap_err();
        assert_eq!(err, ParseError::table_not_found("table.os-table"));
    }

    #[test]
    fn test_parse_link_text_missing_version() {
        let result = BracketedTableParser::parse_link_text("[01/02/23]", false);
        assert!(result.is_err());
    }
}
