//! URL handling module for Fathom
//!
//! This module provides link resolution against the page a link appeared on,
//! and validation of the seed URL the crawl starts from.

mod resolve;

// Re-export main functions
pub use resolve::resolve;

use crate::CrawlError;
use url::Url;

/// Validates and canonicalizes the seed URL supplied on the command line
///
/// The seed must parse as an absolute `http` or `https` URL. The canonical
/// serialization is returned (fragment stripped, path slash normalized) so
/// that the seed deduplicates against links that resolve back to it.
///
/// # Arguments
///
/// * `seed` - The raw seed string from the command line
///
/// # Returns
///
/// The canonical seed URL, or [`CrawlError::InvalidSeed`] explaining why it
/// was refused
pub fn validate_seed(seed: &str) -> Result<String, CrawlError> {
    let mut parsed = Url::parse(seed).map_err(|e| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;
    parsed.set_fragment(None);

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme: {}", other),
        }),
    }
}
