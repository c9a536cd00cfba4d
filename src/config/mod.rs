//! Configuration module for Fathom
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so running without a file works.
//!
//! # Example
//!
//! ```no_run
//! use fathom::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fathom.toml")).unwrap();
//! println!("Snapshot will be written to: {}", config.output.snapshot_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::load_config;
