//! Fathom: a depth-bounded web snapshot crawler
//!
//! This crate crawls outward from a single seed page to a bounded hop depth,
//! fanning out one concurrent scrape task per discovered link, deduplicating
//! URLs through a shared tracker, and writing one aggregate JSON snapshot of
//! everything it saw when the run ends.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for fathom operations
///
/// Per-URL fetch and parse failures never surface here; they are recorded as
/// [`state::FailureRecord`]s and the run keeps going. This type covers the
/// fatal paths only: startup validation, configuration, and snapshot output.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed is not a valid absolute URL: {url}: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Crawl depth must be a positive number")]
    InvalidDepth,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to serialize snapshot: {0}")]
    SnapshotSerialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from a single HTTP request
///
/// These are recorded per URL and never abort a run.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Status code: {0}")]
    Status(u16),
}

/// Error for an HTML body that could not be read or parsed
///
/// Treated exactly like a fetch error: one failure record, no retry.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Errors from resolving a page-relative href
///
/// A resolution failure silently drops that one link candidate; since no
/// fetch was attempted, nothing is recorded against the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Href is a same-page fragment")]
    SelfFragment,

    #[error("Base URL is not absolute: {0}")]
    InvalidBase(String),

    #[error("Href could not be resolved against the base: {0}")]
    Join(String),

    #[error("Scheme is not crawlable: {0}")]
    DisallowedScheme(String),
}

/// Result type alias for fathom operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use audit::{AuditLevel, AuditLog};
pub use config::Config;
pub use crawler::Orchestrator;
pub use output::CrawlSnapshot;
pub use state::{FailureRecord, PageRecord, StateTracker};
