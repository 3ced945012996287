//! Core domain models for relsheet
//!
//! This module contains the fundamental types used throughout the application:
//! - Release entries scraped from documentation tables
//! - Targets and the table formats they are published in
//! - Release date parsing shared by the merge step
//! - Per-target and summary outcomes collected into a run report

mod entry;
mod release_date;
mod report;
mod summary;
mod target;

pub use entry::{ReleaseEntry, Row};
pub use release_date::{parse_release_date, DATE_FORMAT};
pub use report::{RunReport, SkippedRow, TargetReport, TargetStatus};
pub use summary::{SummaryReport, SummaryRow, SUMMARY_HEADER};
pub use target::{TableFormat, Target, TargetGroup, ICON_WORKSHEET};
