//! Integration tests for relsheet
//!
//! These tests verify:
//! - Settings and target lists loaded from disk drive a full run
//! - Both table formats land in their worksheets with merge semantics intact
//! - The summary sheet reflects the latest row of every worksheet
//! - Reports render in both output formats

use chrono::NaiveDate;
use relsheet::config::{load_groups, Settings};
use relsheet::domain::Row;
use relsheet::orchestrator::{Orchestrator, RunOptions};
use relsheet::output::{create_formatter, OutputConfig, OutputFormat, Verbosity};
use relsheet::sheets::MemorySheets;
use relsheet::source::StaticPages;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SIP_URL: &str = "https://docs.example.com/sip-server/release-notes";
const ICON_URL: &str = "https://docs.example.com/icon/release-notes";
const GAX_URL: &str = "https://docs.example.com/gax/release-notes";

const SIP_PAGE: &str = r#"<html><body>
<table class="os-table">
  <tr><td><a href="/sip/8.1.104.12">8.1.104.12[03/15/24]</a></td></tr>
  <tr><td><a href="/sip/8.1.104.11">8.1.104.11[01/10/24]</a></td></tr>
  <tr><td><a href="/sip/about">About this product</a></td></tr>
  <tr><td><a href="/sip/notes">Known issues[TBD]</a></td></tr>
</table>
</body></html>"#;

const ICON_PAGE: &str = r#"<html><body>
<table class="os-table">
  <tr><td><a>8.1.500.07[03/15/24]</a></td></tr>
</table>
</body></html>"#;

const GAX_PAGE: &str = r#"<html><body>
<table>
  <tr><th>Release</th><th>Date</th></tr>
  <tr><td><a href="/gax/9.0.104.02">9.0.104.02</a></td><td>03/15/24</td></tr>
  <tr><td><a href="/gax/9.0.103.05">9.0.103.05</a></td><td>11/02/23</td></tr>
  <tr><td>9.0.103.01</td><td>10/01/23</td></tr>
</table>
<table><tr><td>unrelated</td><td>12/12/12</td></tr></table>
</body></html>"#;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Write settings plus both target lists into `dir`
fn write_project(dir: &Path) -> std::path::PathBuf {
    fs::write(
        dir.join("81_targets.json"),
        format!(
            r#"[
  {{"name": "SIP Server", "url": "{SIP_URL}", "worksheet": "SIP"}},
  {{"name": "Interaction Concentrator", "url": "{ICON_URL}", "worksheet": "ICON"}}
]"#
        ),
    )
    .unwrap();
    fs::write(
        dir.join("85_targets.json"),
        format!(r#"[{{"name": "GAX", "url": "{GAX_URL}", "worksheet": "GAX"}}]"#),
    )
    .unwrap();

    let settings = dir.join("relsheet.toml");
    fs::write(
        &settings,
        r#"spreadsheet = "Test Notes"

[[groups]]
label = "8.1"
format = "bracketed"
path = "81_targets.json"

[[groups]]
label = "8.5+"
format = "two-column"
path = "85_targets.json"
"#,
    )
    .unwrap();
    settings
}

fn pages() -> StaticPages {
    StaticPages::new()
        .with_page(SIP_URL, SIP_PAGE)
        .with_page(ICON_URL, ICON_PAGE)
        .with_page(GAX_URL, GAX_PAGE)
}

fn sheets() -> MemorySheets {
    MemorySheets::new()
        .with_sheet("SIP", vec![row(&["8.1.104.11", "2024-01-10"])])
        .with_sheet("ICON", vec![])
        .with_sheet("GAX", vec![row(&["9.0.103.05", "2023-11-02", "/gax/old-link"])])
}

mod full_run {
    use super::*;

    /// Settings on disk, pages and sheets in memory
    #[tokio::test]
    async fn test_run_from_settings_file() {
        let dir = create_test_dir();
        let settings = Settings::load(Some(&write_project(dir.path()))).unwrap();
        let groups = load_groups(&settings.select_groups(&[]).unwrap()).unwrap();
        assert_eq!(groups.len(), 2);

        let pages = pages();
        let sheets = sheets();
        let report = Orchestrator::new(&pages, &sheets, settings.summary_sheet.clone())
            .with_today(today())
            .run(&groups)
            .await;

        assert_eq!(report.failed_count(), 0);
        assert_eq!(report.updated_count(), 3);
        assert_eq!(report.total_added(), 3);

        assert_eq!(
            sheets.rows("SIP").unwrap(),
            vec![
                row(&["8.1.104.12", "2024-03-15"]),
                row(&["8.1.104.11", "2024-01-10"]),
            ]
        );
        // Two-digit year kept for the icon worksheet
        assert_eq!(sheets.rows("ICON").unwrap(), vec![row(&["8.1.500.07", "24-03-15"])]);
        // Existing row keeps its link
        assert_eq!(
            sheets.rows("GAX").unwrap(),
            vec![
                row(&["9.0.104.02", "2024-03-15", "/gax/9.0.104.02"]),
                row(&["9.0.103.05", "2023-11-02", "/gax/old-link"]),
            ]
        );

        let sip = &report.targets[0];
        assert_eq!(sip.skipped_rows.len(), 1);
        assert!(sip.skipped_rows[0].reason.contains("TBD"));
        let gax = &report.targets[2];
        assert_eq!(gax.skipped_rows[0].reason, "missing version link");

        let summary = sheets.rows("Summary").unwrap();
        assert_eq!(summary[0], row(&["Component", "Version", "Date", "Updated Today?"]));
        assert_eq!(summary.len(), 4);
        assert_eq!(summary[1], row(&["ICON", "8.1.500.07", "24-03-15", ""]));
        assert!(summary[2..].iter().all(|r| r[3] == "✅"));
        assert_eq!(sheets.highlighted("Summary"), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_rerun_writes_nothing_new() {
        let dir = create_test_dir();
        let settings = Settings::load(Some(&write_project(dir.path()))).unwrap();
        let groups = load_groups(&settings.groups).unwrap();

        let pages = pages();
        let sheets = sheets();
        let orchestrator = Orchestrator::new(&pages, &sheets, "Summary").with_today(today());
        orchestrator.run(&groups).await;
        let second = orchestrator.run(&groups).await;

        assert_eq!(second.unchanged_count(), 3);
        for worksheet in ["SIP", "ICON", "GAX"] {
            assert_eq!(sheets.write_count(worksheet), 1, "{worksheet}");
        }
    }

    #[tokio::test]
    async fn test_group_filter() {
        let dir = create_test_dir();
        let settings = Settings::load(Some(&write_project(dir.path()))).unwrap();
        let selected = settings.select_groups(&["8.5+".to_string()]).unwrap();
        let groups = load_groups(&selected).unwrap();

        let pages = pages();
        let sheets = sheets();
        let report = Orchestrator::new(&pages, &sheets, "Summary")
            .with_options(RunOptions {
                skip_summary: true,
                ..RunOptions::default()
            })
            .with_today(today())
            .run(&groups)
            .await;

        assert_eq!(report.targets.len(), 1);
        assert_eq!(report.targets[0].worksheet, "GAX");
        assert_eq!(sheets.write_count("SIP"), 0);
        assert!(sheets.rows("Summary").is_none());
    }
}

mod failure_isolation {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_page_and_missing_worksheet() {
        let dir = create_test_dir();
        let settings = Settings::load(Some(&write_project(dir.path()))).unwrap();
        let groups = load_groups(&settings.groups).unwrap();

        // SIP page unreachable, no ICON worksheet
        let pages = StaticPages::new()
            .with_unreachable(SIP_URL)
            .with_page(ICON_URL, ICON_PAGE)
            .with_page(GAX_URL, GAX_PAGE);
        let sheets = MemorySheets::new()
            .with_sheet("SIP", vec![row(&["8.1.104.11", "2024-01-10"])])
            .with_sheet("GAX", vec![]);

        let report = Orchestrator::new(&pages, &sheets, "Summary")
            .with_today(today())
            .run(&groups)
            .await;

        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.updated_count(), 1);
        let failed: Vec<_> = report.failures().map(|t| t.worksheet.as_str()).collect();
        assert_eq!(failed, vec!["SIP", "ICON"]);

        assert_eq!(sheets.rows("SIP").unwrap().len(), 1);
        assert_eq!(sheets.rows("GAX").unwrap().len(), 2);
        assert!(report.summary.unwrap().written);
    }
}

mod output {
    use super::*;

    #[tokio::test]
    async fn test_report_renders_in_both_formats() {
        let dir = create_test_dir();
        let settings = Settings::load(Some(&write_project(dir.path()))).unwrap();
        let groups = load_groups(&settings.groups).unwrap();

        let pages = pages();
        let sheets = sheets();
        let report = Orchestrator::new(&pages, &sheets, "Summary")
            .with_options(RunOptions {
                dry_run: true,
                ..RunOptions::default()
            })
            .with_today(today())
            .run(&groups)
            .await;

        let mut text = Vec::new();
        create_formatter(OutputConfig::new(OutputFormat::Text, Verbosity::Normal))
            .format(&report, &mut text)
            .unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("SIP Server"));
        assert!(text.contains("(dry-run)"));

        let mut json = Vec::new();
        create_formatter(OutputConfig::new(OutputFormat::Json, Verbosity::Verbose))
            .format(&report, &mut json)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["totals"]["updated"], 3);
        assert_eq!(json["targets"].as_array().unwrap().len(), 3);
        assert_eq!(json["summary"]["written"], false);
    }
}
