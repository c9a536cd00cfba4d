//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - HEAD probes to classify Content-Type before committing to a download
//! - GET requests to fetch page bodies
//! - Error classification into the fetch error taxonomy

use crate::config::FetcherConfig;
use crate::FetchError;
use reqwest::{Client, Response};
use std::time::Duration;

/// Metadata learned from the HEAD probe of a URL
#[derive(Debug, Clone)]
pub struct HeadInfo {
    /// Content-Type header value, lowercased; empty when the header is
    /// absent
    pub content_type: String,

    /// Content-Length when the server reported one
    pub content_length: Option<u64>,
}

impl HeadInfo {
    /// True when the probed resource is an HTML document worth downloading
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html")
    }
}

/// Builds the HTTP client shared by every scrape task
///
/// Redirects follow reqwest's default policy of at most ten hops; the
/// status and headers seen by the crawler are those of the final response.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Probes a URL with a HEAD request.
///
/// A non-2xx status or any transport failure yields a [`FetchError`]. The
/// Content-Type is lowercased before classification so header casing cannot
/// defeat the HTML check.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to probe
///
/// # Returns
///
/// * `Ok(HeadInfo)` - Content metadata from the response headers
/// * `Err(FetchError)` - Timeout, transport failure, or non-2xx status
pub async fn fetch_head(client: &Client, url: &str) -> Result<HeadInfo, FetchError> {
    let response = client.head(url).send().await.map_err(classify)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    // A HEAD response carries no body, so the body size hint is always
    // zero; the advertised header is the only source for the length.
    let content_length = response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    Ok(HeadInfo {
        content_type,
        content_length,
    })
}

/// Downloads a URL with a GET request.
///
/// The status is checked here; reading the body is left to the caller so
/// body decoding problems can be classified separately from transport ones.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to download
///
/// # Returns
///
/// * `Ok(Response)` - Response with a 2xx status, body unread
/// * `Err(FetchError)` - Timeout, transport failure, or non-2xx status
pub async fn fetch_get(client: &Client, url: &str) -> Result<Response, FetchError> {
    let response = client.get(url).send().await.map_err(classify)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response)
}

/// Maps a reqwest error onto the crawl's fetch taxonomy
fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}
