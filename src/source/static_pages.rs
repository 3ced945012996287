//! Canned page source keyed by URL

use super::PageSource;
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Page source that serves pre-loaded HTML bodies.
///
/// Unknown URLs answer 404. URLs marked unreachable fail like a refused connection.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
}

impl StaticPages {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page body for `url` (builder pattern)
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Make `url` fail at the transport level (builder pattern)
    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.unreachable.insert(url.into());
        self
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        if self.unreachable.contains(url) {
            return Err(FetchError::network(url, "connection refused"));
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_page() {
        let pages = StaticPages::new().with_page("https://a", "<html></html>");
        assert_eq!(pages.fetch_page("https://a").await.unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let pages = StaticPages::new();
        let err = pages.fetch_page("https://missing").await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_page() {
        let pages = StaticPages::new()
            .with_page("https://a", "<html></html>")
            .with_unreachable("https://a");
        let err = pages.fetch_page("https://a").await.unwrap_err();
        assert!(matches!(err, FetchError::NetworkError { .. }));
    }
}
