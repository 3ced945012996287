//! relsheet - release-notes scraper library
//!
//! This library provides the building blocks for tracking component releases
//! in a spreadsheet:
//! - Table parsers for the supported documentation formats
//! - Merge of freshly scraped entries into existing worksheet rows
//! - Summary sheet of each component's latest release
//! - Google Sheets and in-memory spreadsheet backends

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod sheets;
pub mod source;
pub mod summarizer;
