//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with HEAD-first content classification
//! - HTML parsing and content extraction
//! - The per-URL scrape state machine
//! - Recursive fan-out orchestration of the whole run

mod fetcher;
mod orchestrator;
mod parser;
mod scrape;

pub use fetcher::{build_http_client, fetch_get, fetch_head, HeadInfo};
pub use orchestrator::Orchestrator;
pub use parser::{parse_html, ParsedPage};
pub use scrape::{scrape, ScrapeContext, ScrapeOutcome};
