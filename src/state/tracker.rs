//! Shared dedup state for a crawl run
//!
//! The tracker is the single source of truth for which URLs have succeeded,
//! failed, or are currently being scraped. Every concurrently running scrape
//! task goes through it, so all access is serialized by one mutex that is
//! held only for the duration of a call and never across I/O.

use crate::state::{FailureRecord, PageRecord};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Admission decision for a URL about to be scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL was unseen and is now marked in-flight; the caller owns it
    Admitted,

    /// The succeeded collection already holds a record for this URL
    AlreadySucceeded,

    /// The failed collection already holds a record for this URL
    AlreadyFailed,

    /// Another task is currently scraping this URL
    AlreadyInFlight,
}

/// Sizes of the three tracker collections at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub in_flight: usize,
}

impl TrackerCounts {
    /// Terminal pages observed so far
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Mutex-guarded authority over the succeeded, failed, and in-flight
/// collections
///
/// The three collections partition every URL the run has observed: a URL is
/// in at most one of them at any instant, and transitions are one-way. Once
/// a URL is terminal it is never scraped again. Succeeded records are stored
/// behind `Arc` so the orchestrator can recurse over a page's links without
/// copying the record.
#[derive(Debug, Default)]
pub struct StateTracker {
    inner: Mutex<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    succeeded: HashMap<String, Arc<PageRecord>>,
    failed: HashMap<String, FailureRecord>,
    in_flight: HashSet<String>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically admits a URL for scraping.
    ///
    /// Checks all three collections and inserts the in-flight marker under a
    /// single lock acquisition, so two tasks racing on the same URL can never
    /// both be admitted. URLs with a terminal record are refused outright: a
    /// failed URL stays failed for the whole run.
    pub fn begin(&self, url: &str) -> Admission {
        let mut inner = self.lock();
        if inner.succeeded.contains_key(url) {
            return Admission::AlreadySucceeded;
        }
        if inner.failed.contains_key(url) {
            return Admission::AlreadyFailed;
        }
        if !inner.in_flight.insert(url.to_string()) {
            return Admission::AlreadyInFlight;
        }
        Admission::Admitted
    }

    /// Marks a URL as in-flight without consulting the terminal collections.
    ///
    /// Scrape tasks enter through [`begin`](Self::begin); this finer-grained
    /// verb is kept for callers that have already decided.
    pub fn mark_in_flight(&self, url: &str) {
        self.lock().in_flight.insert(url.to_string());
    }

    pub fn is_in_flight(&self, url: &str) -> bool {
        self.lock().in_flight.contains(url)
    }

    pub fn is_succeeded(&self, url: &str) -> bool {
        self.lock().succeeded.contains_key(url)
    }

    pub fn is_failed(&self, url: &str) -> bool {
        self.lock().failed.contains_key(url)
    }

    /// Commits a terminal success and clears the in-flight marker in one
    /// step.
    ///
    /// Returns the shared record so the caller can hand it to the
    /// orchestrator for recursion.
    pub fn commit_success(&self, record: PageRecord) -> Arc<PageRecord> {
        let record = Arc::new(record);
        let mut inner = self.lock();
        inner.in_flight.remove(record.url.as_str());
        inner
            .succeeded
            .insert(record.url.clone(), Arc::clone(&record));
        record
    }

    /// Commits a terminal failure and clears the in-flight marker in one
    /// step.
    pub fn commit_failure(&self, record: FailureRecord) {
        let mut inner = self.lock();
        inner.in_flight.remove(record.url.as_str());
        inner.failed.insert(record.url.clone(), record);
    }

    /// Sizes of all three collections from a single lock acquisition
    pub fn counts(&self) -> TrackerCounts {
        let inner = self.lock();
        TrackerCounts {
            succeeded: inner.succeeded.len(),
            failed: inner.failed.len(),
            in_flight: inner.in_flight.len(),
        }
    }

    /// Copies the two terminal collections out, key-sorted for deterministic
    /// serialization.
    ///
    /// Intended for run-end aggregation, after every scrape task has been
    /// joined.
    pub fn export_collections(
        &self,
    ) -> (BTreeMap<String, PageRecord>, BTreeMap<String, FailureRecord>) {
        let inner = self.lock();
        let succeeded = inner
            .succeeded
            .iter()
            .map(|(url, record)| (url.clone(), (**record).clone()))
            .collect();
        let failed = inner
            .failed
            .iter()
            .map(|(url, record)| (url.clone(), record.clone()))
            .collect();
        (succeeded, failed)
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap()
    }
}
