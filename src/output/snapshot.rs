//! Aggregate snapshot of a finished crawl run

use crate::state::{FailureRecord, PageRecord};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Everything one crawl run produced, serialized as a single JSON document
///
/// The two record maps are key-sorted, so the same crawl data always
/// serializes identically. Timestamps are Unix seconds (UTC); durations are
/// fractional seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    /// The seed URL the run started from
    pub seed: String,

    /// The maximum link depth requested
    pub depth: u32,

    /// When the run began, Unix seconds
    pub begin_timestamp: i64,

    /// When the run ended, Unix seconds
    pub end_timestamp: i64,

    /// Wall-clock duration of the run in fractional seconds
    pub execution_seconds: f64,

    /// Terminal pages per second over the whole run
    pub page_rate_per_sec: f64,

    /// Terminal pages observed, succeeded plus failed
    pub total_pages: usize,

    /// Pages that produced a success record
    pub succeeded_pages: usize,

    /// Pages that produced a failure record
    pub failed_pages: usize,

    /// Success records keyed by URL
    pub succeeded: BTreeMap<String, PageRecord>,

    /// Failure records keyed by URL
    pub failed: BTreeMap<String, FailureRecord>,
}

impl CrawlSnapshot {
    /// Assembles the snapshot from a finished run's terminal collections.
    ///
    /// The count fields are derived from the maps, so
    /// `total_pages == succeeded_pages + failed_pages` holds by
    /// construction. A zero-length run reports a page rate of zero rather
    /// than dividing by zero.
    pub fn build(
        seed: &str,
        depth: u32,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
        succeeded: BTreeMap<String, PageRecord>,
        failed: BTreeMap<String, FailureRecord>,
    ) -> Self {
        let execution_seconds = (end - begin).num_milliseconds() as f64 / 1000.0;
        let succeeded_pages = succeeded.len();
        let failed_pages = failed.len();
        let total_pages = succeeded_pages + failed_pages;
        let page_rate_per_sec = if execution_seconds > 0.0 {
            total_pages as f64 / execution_seconds
        } else {
            0.0
        };

        Self {
            seed: seed.to_string(),
            depth,
            begin_timestamp: begin.timestamp(),
            end_timestamp: end.timestamp(),
            execution_seconds,
            page_rate_per_sec,
            total_pages,
            succeeded_pages,
            failed_pages,
            succeeded,
            failed,
        }
    }

    /// Serializes the snapshot as pretty-printed JSON and writes it to
    /// `path` in one shot.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file, overwritten if it exists
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
