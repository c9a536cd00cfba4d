//! State module for tracking crawl progress
//!
//! This module holds the shared dedup state for a run and the record types
//! it stores.
//!
//! # Components
//!
//! - `StateTracker`: Mutex-guarded authority over the succeeded, failed, and in-flight collections
//! - `PageRecord`: Everything extracted from one successfully scraped page
//! - `FailureRecord`: Terminal failure reason for a URL

mod records;
mod tracker;

// Re-export main types
pub use records::{FailureRecord, PageRecord};
pub use tracker::{Admission, StateTracker, TrackerCounts};

pub(crate) use records::unix_now;
