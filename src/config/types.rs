use serde::Deserialize;

/// Browser-style identity sent when no user agent is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_5_2) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.159 Safari/537.36";

/// Main configuration structure for Fathom
///
/// Every field has a default, so a missing file or a partial file still
/// yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// HTTP client behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header attached to every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout applied to each HEAD and GET, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the aggregate JSON snapshot is written to
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: String,

    /// Path of the append-only audit log
    #[serde(rename = "audit-log-path")]
    pub audit_log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "results.json".to_string(),
            audit_log_path: "logs.txt".to_string(),
        }
    }
}
