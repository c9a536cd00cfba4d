//! Fathom main entry point
//!
//! This is the command-line interface for the Fathom web snapshot crawler.

use clap::Parser;
use fathom::audit::AuditLog;
use fathom::config::{load_config, Config};
use fathom::Orchestrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Fathom: a depth-bounded web snapshot crawler
///
/// Fathom crawls outward from a seed page to a fixed link depth, collecting
/// titles, descriptions, paragraph text, and the outbound link graph of
/// every page it reaches, then writes the whole run to one JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "fathom")]
#[command(version = "0.1.0")]
#[command(about = "A depth-bounded web snapshot crawler", long_about = None)]
struct Cli {
    /// Seed URL the crawl starts from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Maximum link depth to follow from the seed (must be at least 1)
    #[arg(value_name = "DEPTH")]
    depth: u32,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    // Validate the seed and depth before any output file is created
    let orchestrator = match Orchestrator::new(&cli.seed, cli.depth, &config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            tracing::error!("Cannot start crawl: {}", e);
            return Err(e.into());
        }
    };

    let audit = Arc::new(AuditLog::open(Path::new(&config.output.audit_log_path)));
    let snapshot = orchestrator.run(Arc::clone(&audit)).await;

    match snapshot.write_to_file(Path::new(&config.output.snapshot_path)) {
        Ok(()) => {
            audit.info(&format!(
                "Results saved to file: {}",
                config.output.snapshot_path
            ));
        }
        Err(e) => {
            audit.error(&format!("Error saving results to file: {}", e));
            tracing::error!("Failed to write snapshot: {}", e);
            return Err(e.into());
        }
    }

    println!(
        "✓ Crawled {} pages: {} succeeded, {} failed",
        snapshot.total_pages, snapshot.succeeded_pages, snapshot.failed_pages
    );
    println!(
        "✓ Finished in {:.2}s ({:.2} pages/sec)",
        snapshot.execution_seconds, snapshot.page_rate_per_sec
    );
    println!("✓ Snapshot saved to: {}", config.output.snapshot_path);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fathom=info,warn"),
            1 => EnvFilter::new("fathom=debug,info"),
            2 => EnvFilter::new("fathom=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
