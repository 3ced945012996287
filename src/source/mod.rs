//! Documentation page sources
//!
//! This module provides:
//! - HTTP client with timeout and optional retry
//! - A canned-page source for offline runs and tests
//! - The fetch step that turns a target's page into parsed entries

mod client;
mod fetcher;
mod static_pages;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use fetcher::fetch_table;
pub use static_pages::StaticPages;

use crate::error::FetchError;
use async_trait::async_trait;

/// Trait for anything that can return the HTML body of a URL
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Download the page at `url`
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}
