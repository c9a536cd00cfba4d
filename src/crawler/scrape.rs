//! Per-URL scrape task
//!
//! One scrape is a small state machine: admission through the state
//! tracker, HEAD probe, content-type classification, GET, parse, extract,
//! then exactly one terminal commit. Every call emits exactly one outcome
//! for its launcher to consume.

use crate::audit::AuditLog;
use crate::crawler::fetcher;
use crate::crawler::parser;
use crate::state::{unix_now, Admission, FailureRecord, PageRecord, StateTracker};
use crate::ParseError;
use reqwest::Client;
use std::fmt::Display;
use std::sync::Arc;

/// Everything a scrape task needs; cheap to clone per spawned task
#[derive(Clone)]
pub struct ScrapeContext {
    pub client: Client,
    pub tracker: Arc<StateTracker>,
    pub audit: Arc<AuditLog>,
}

/// Outcome of one scrape task
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// Terminal success; the record drives one more recursion level
    Scraped(Arc<PageRecord>),

    /// Terminal failure; a failure record was committed
    Failed(String),

    /// The URL was skipped before any fetch; nothing was committed
    Skipped(String),
}

/// Runs the complete scrape state machine for one URL.
///
/// Admission is atomic: a URL that is empty, already terminal, or already
/// being scraped is skipped without committing anything. Once admitted, the
/// URL is guaranteed exactly one terminal commit before this function
/// returns, whatever path the fetch takes.
///
/// # Arguments
///
/// * `ctx` - Shared client, tracker, and audit log
/// * `url` - Absolute URL to scrape
///
/// # Returns
///
/// The single [`ScrapeOutcome`] for this task
pub async fn scrape(ctx: &ScrapeContext, url: &str) -> ScrapeOutcome {
    if url.is_empty() {
        return ScrapeOutcome::Skipped("empty URL".to_string());
    }

    match ctx.tracker.begin(url) {
        Admission::Admitted => {}
        Admission::AlreadySucceeded => {
            return ScrapeOutcome::Skipped(format!("page already visited: {}", url));
        }
        Admission::AlreadyFailed => {
            return ScrapeOutcome::Skipped(format!("page already failed: {}", url));
        }
        Admission::AlreadyInFlight => {
            return ScrapeOutcome::Skipped(format!("page already being scraped: {}", url));
        }
    }

    tracing::debug!("Scraping URL: {}", url);

    let head = match fetcher::fetch_head(&ctx.client, url).await {
        Ok(head) => head,
        Err(e) => return fail(ctx, url, e),
    };

    // Non-HTML assets are recorded from HEAD metadata alone; the body is
    // never downloaded.
    if !head.is_html() {
        let record = PageRecord::non_html(url, head.content_type, head.content_length);
        return succeed(ctx, record);
    }

    let response = match fetcher::fetch_get(&ctx.client, url).await {
        Ok(response) => response,
        Err(e) => return fail(ctx, url, e),
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return fail(ctx, url, ParseError(e.to_string())),
    };

    let parsed = parser::parse_html(&body, url);
    let record = PageRecord {
        url: url.to_string(),
        title: parsed.title,
        description: parsed.description,
        content_type: head.content_type,
        content_length: head.content_length,
        fetched_at_unix: unix_now(),
        outbound_links: parsed.links,
        paragraphs: parsed.paragraphs,
    };
    succeed(ctx, record)
}

/// Commits the success record, then reports it. The audit write happens
/// after the tracker lock is released.
fn succeed(ctx: &ScrapeContext, record: PageRecord) -> ScrapeOutcome {
    let record = ctx.tracker.commit_success(record);
    ctx.audit
        .info(&format!("Scrape succeeded on page: {}", record.url));
    tracing::debug!(
        "Scraped {}: {} links, {} paragraphs",
        record.url,
        record.outbound_links.len(),
        record.paragraphs.len()
    );
    ScrapeOutcome::Scraped(record)
}

/// Commits the failure record, then reports it. The audit write happens
/// after the tracker lock is released.
fn fail(ctx: &ScrapeContext, url: &str, error: impl Display) -> ScrapeOutcome {
    let reason = error.to_string();
    ctx.tracker.commit_failure(FailureRecord::new(url, &reason));
    ctx.audit
        .info(&format!("Scrape failed on page: {} Reason: {}", url, reason));
    tracing::debug!("Scrape failed for {}: {}", url, reason);
    ScrapeOutcome::Failed(reason)
}
