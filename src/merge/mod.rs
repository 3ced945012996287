//! Merge of freshly scraped entries into destination sheets
//!
//! This module provides:
//! - MergePlan computation: de-duplication by version, date sort, change detection
//! - Reconciler that reads a sheet, applies the plan and rewrites it when needed
//! - Dry-run mode support (plans are computed but nothing is written)

mod plan;
mod reconciler;

pub use plan::{plan_merge, sort_by_release_date, MergePlan, UnparsableDate};
pub use reconciler::{ReconcileOutcome, Reconciler};
