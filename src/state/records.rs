//! Terminal outcome records for crawled URLs
//!
//! A URL that reaches a terminal state gets exactly one of these, created by
//! the scrape task that finished it and never mutated afterwards. Both types
//! serialize into the run's snapshot document.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Everything extracted from one successfully scraped page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// The canonical absolute URL this record belongs to
    pub url: String,

    /// Normalized text of the page's title element
    pub title: String,

    /// Content of the description meta tag, falling back to the title
    pub description: String,

    /// Lowercased Content-Type reported by the HEAD response
    pub content_type: String,

    /// Content-Length from the HEAD response, when the server sent one
    pub content_length: Option<u64>,

    /// Unix seconds (UTC) at which the scrape completed
    pub fetched_at_unix: i64,

    /// Resolved outbound link URLs, deduplicated, first-occurrence order
    pub outbound_links: Vec<String>,

    /// Normalized non-empty paragraph texts in document order
    pub paragraphs: Vec<String>,
}

impl PageRecord {
    /// Builds the minimal record for a non-HTML asset.
    ///
    /// Only HEAD metadata is available for these: every text field stays
    /// empty and no links are followed.
    pub fn non_html(
        url: impl Into<String>,
        content_type: impl Into<String>,
        content_length: Option<u64>,
    ) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            content_type: content_type.into(),
            content_length,
            fetched_at_unix: unix_now(),
            outbound_links: Vec::new(),
            paragraphs: Vec::new(),
        }
    }
}

/// Terminal failure data for a URL whose scrape could not complete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The URL that failed
    pub url: String,

    /// Human-readable classification of what went wrong
    pub reason: String,

    /// Unix seconds (UTC) at which the failure was recorded
    pub failed_at_unix: i64,
}

impl FailureRecord {
    /// Creates a failure record stamped with the current time.
    pub fn new(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
            failed_at_unix: unix_now(),
        }
    }
}

/// Current Unix timestamp in seconds, UTC
pub(crate) fn unix_now() -> i64 {
    Utc::now().timestamp()
}
