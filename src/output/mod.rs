//! Output module for the run's aggregate document
//!
//! This module handles:
//! - Assembling the aggregate snapshot from a run's terminal collections
//! - Serializing it to a single JSON file

mod snapshot;

pub use snapshot::CrawlSnapshot;
