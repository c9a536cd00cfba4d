//! Thread-safe audit log for crawl events
//!
//! Scrape outcomes are appended to a run log file so a finished crawl can be
//! audited after the fact. This is separate from the tracing diagnostics
//! stream: tracing reports engine internals to the console, the audit log
//! records the crawl's own story. Components receive an explicit handle
//! rather than writing through a global.

use chrono::Utc;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Severity attached to each audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "INFO"),
            AuditLevel::Warning => write!(f, "WARNING"),
            AuditLevel::Error => write!(f, "ERROR"),
        }
    }
}

enum Sink {
    File(File),
    Console,
}

/// Leveled append-only logger shared by every scrape task
///
/// One mutex serializes all writes, so concurrently logged lines never
/// interleave. A log that cannot reach its file degrades to the console and
/// keeps the run alive; logging problems are never fatal.
pub struct AuditLog {
    sink: Mutex<Sink>,
}

impl AuditLog {
    /// Opens the audit log at `path`, appending if the file already exists.
    ///
    /// When the file cannot be opened the log degrades to the console
    /// instead of failing the run; the degradation is reported through
    /// tracing.
    pub fn open(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Mutex::new(Sink::File(file)),
            },
            Err(e) => {
                tracing::warn!(
                    "Could not open audit log file {}: {}, degrading to console",
                    path.display(),
                    e
                );
                Self::console()
            }
        }
    }

    /// An audit log that only writes to the console
    pub fn console() -> Self {
        Self {
            sink: Mutex::new(Sink::Console),
        }
    }

    pub fn info(&self, message: &str) {
        self.write(AuditLevel::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.write(AuditLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.write(AuditLevel::Error, message);
    }

    /// Appends one line. A failed file write degrades the sink to the
    /// console for the rest of the run.
    fn write(&self, level: AuditLevel, message: &str) {
        let line = format!(
            "{}: {} {}\n",
            level,
            Utc::now().format("%Y/%m/%d %H:%M:%S"),
            message
        );

        let mut sink = self.sink.lock().unwrap();
        if let Sink::File(file) = &mut *sink {
            if file.write_all(line.as_bytes()).is_ok() {
                return;
            }
            tracing::warn!("Audit log write failed, degrading to console");
            *sink = Sink::Console;
        }
        eprint!("{}", line);
    }
}
