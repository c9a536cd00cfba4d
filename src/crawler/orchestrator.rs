//! Crawl orchestration
//!
//! This module owns a whole crawl run: it validates the inputs, launches
//! the seed scrape, fans out one concurrent task per outbound link at each
//! level, joins every spawned subtree, and builds the final snapshot.

use crate::audit::AuditLog;
use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::scrape::{scrape, ScrapeContext, ScrapeOutcome};
use crate::output::CrawlSnapshot;
use crate::state::{PageRecord, StateTracker};
use crate::url::validate_seed;
use crate::{CrawlError, Result};
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Drives one crawl run from seed to snapshot
///
/// Fan-out is recursive and uncapped: every outbound link of a page gets
/// its own task, all launched at once, and a recursion frame returns only
/// when its entire subtree has completed. Dedup through the state tracker
/// is what keeps the task count bounded in practice.
pub struct Orchestrator {
    seed: String,
    depth: u32,
    client: Client,
    tracker: Arc<StateTracker>,
}

impl Orchestrator {
    /// Validates the run inputs and prepares the shared client and tracker.
    ///
    /// Validation happens here, before any output file is touched: a bad
    /// seed or depth fails the run with nothing written anywhere.
    ///
    /// # Arguments
    ///
    /// * `seed` - Raw seed URL from the command line
    /// * `depth` - Maximum link depth to follow from the seed
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(CrawlError)` - Invalid seed, invalid depth, or client build
    ///   failure
    pub fn new(seed: &str, depth: u32, config: &Config) -> Result<Self> {
        let seed = validate_seed(seed)?;
        if depth == 0 {
            return Err(CrawlError::InvalidDepth);
        }

        Ok(Self {
            seed,
            depth,
            client: build_http_client(&config.fetcher)?,
            tracker: Arc::new(StateTracker::new()),
        })
    }

    /// Runs the crawl to completion and returns the aggregate snapshot.
    ///
    /// The seed is scraped first; if it succeeds and more than one level
    /// was requested, its record starts the recursive fan-out. The call
    /// returns only when every spawned scrape task, direct and transitive,
    /// has completed. A failed seed still yields a snapshot recording the
    /// failure.
    ///
    /// # Arguments
    ///
    /// * `audit` - Audit log handle shared with every scrape task
    pub async fn run(&self, audit: Arc<AuditLog>) -> CrawlSnapshot {
        let ctx = ScrapeContext {
            client: self.client.clone(),
            tracker: Arc::clone(&self.tracker),
            audit,
        };

        let begin = Utc::now();
        ctx.audit.info(&format!(
            "Crawl starting for url: {} with depth: {}",
            self.seed, self.depth
        ));
        tracing::info!("Crawl starting for {} with depth {}", self.seed, self.depth);

        match scrape(&ctx, &self.seed).await {
            ScrapeOutcome::Scraped(record) => {
                if self.depth > 1 {
                    self.crawl(&ctx, record, self.depth - 1).await;
                }
            }
            ScrapeOutcome::Failed(reason) | ScrapeOutcome::Skipped(reason) => {
                ctx.audit.error(&format!("Scrape error: {}", reason));
            }
        }

        let end = Utc::now();
        let counts = self.tracker.counts();
        ctx.audit.info(&format!(
            "Crawl finished: {} pages succeeded, {} pages failed",
            counts.succeeded, counts.failed
        ));
        tracing::info!(
            "Crawl finished: {} succeeded, {} failed",
            counts.succeeded,
            counts.failed
        );

        let (succeeded, failed) = self.tracker.export_collections();
        CrawlSnapshot::build(&self.seed, self.depth, begin, end, succeeded, failed)
    }

    /// The shared dedup state, exposed for inspection after a run
    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }

    /// Scrapes every outbound link of `record` concurrently, then recurses
    /// one level deeper into each success as its result arrives.
    ///
    /// This frame is a synchronization barrier: it consumes exactly one
    /// result per spawned task and returns only once its entire subtree,
    /// direct and transitive, has completed. Recursion into one child never
    /// waits for that child's siblings. Nothing here can cancel a task that
    /// has been launched.
    fn crawl<'a>(
        &'a self,
        ctx: &'a ScrapeContext,
        record: Arc<PageRecord>,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if depth == 0 || record.outbound_links.is_empty() {
                return;
            }

            let mut tasks = JoinSet::new();
            for link in &record.outbound_links {
                let task_ctx = ctx.clone();
                let url = link.clone();
                tasks.spawn(async move { scrape(&task_ctx, &url).await });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(ScrapeOutcome::Scraped(child)) => {
                        self.crawl(ctx, child, depth - 1).await;
                    }
                    Ok(ScrapeOutcome::Failed(reason)) | Ok(ScrapeOutcome::Skipped(reason)) => {
                        ctx.audit.error(&format!("Scrape error: {}", reason));
                    }
                    Err(e) => {
                        ctx.audit.error(&format!("Scrape task aborted: {}", e));
                        tracing::error!("Scrape task aborted: {}", e);
                    }
                }
            }
        })
    }
}
