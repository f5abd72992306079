//! Site-Ripple main entry point
//!
//! This is the command-line interface for the Site-Ripple site crawler.

use anyhow::Context;
use clap::Parser;
use site_ripple::config::{load_config, validate, Config, MAX_CONCURRENCY_CAP};
use site_ripple::crawler::Coordinator;
use site_ripple::output::{print_statistics, write_csv_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Ripple: a bounded same-host site crawler
///
/// Crawls every page reachable from BASE_URL on the same host, up to
/// MAX_PAGES distinct pages with at most MAX_CONCURRENCY fetches in flight,
/// and writes one CSV row per page.
#[derive(Parser, Debug)]
#[command(name = "site-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A bounded same-host site crawler", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "BASE_URL")]
    base_url: Option<String>,

    /// Maximum simultaneous fetches (zero or invalid uses the default)
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: Option<String>,

    /// Maximum distinct pages to record (zero or invalid uses the default)
    #[arg(value_name = "MAX_PAGES")]
    max_pages: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the CSV report
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let Some(base_url) = cli.base_url.as_deref() else {
        anyhow::bail!(
            "no website provided; usage: site-ripple <BASE_URL> [MAX_CONCURRENCY] [MAX_PAGES]"
        );
    };

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_concurrency) = concurrency_arg(cli.max_concurrency.as_deref()) {
        config.crawler.max_concurrency = max_concurrency;
    }
    if let Some(max_pages) = positive_arg(cli.max_pages.as_deref()) {
        config.crawler.max_pages = max_pages;
    }
    validate(&config)?;

    let report_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.report_path));

    handle_crawl(base_url, &config, report_path, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_ripple=info,warn"),
            1 => EnvFilter::new("site_ripple=debug,info"),
            2 => EnvFilter::new("site_ripple=trace,debug"),
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

/// Parses a positional count, treating zero and garbage as absent
fn positive_arg(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&value| value > 0)
}

/// Parses the concurrency positional, clamping values above the cap
fn concurrency_arg(raw: Option<&str>) -> Option<usize> {
    positive_arg(raw).map(|value| {
        if value > MAX_CONCURRENCY_CAP {
            tracing::warn!(
                "max concurrency {} is above the limit, using {}",
                value,
                MAX_CONCURRENCY_CAP
            );
            MAX_CONCURRENCY_CAP
        } else {
            value
        }
    })
}

/// Handles the main crawl operation
async fn handle_crawl(
    base_url: &str,
    config: &Config,
    report_path: PathBuf,
    quiet: bool,
) -> anyhow::Result<()> {
    println!("starting crawl of: {}...", base_url);

    let coordinator = Coordinator::from_config(base_url, config)?;

    // Ctrl-C ends the crawl early; whatever was recorded still gets reported
    let cancel = coordinator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping crawl");
            cancel.cancel();
        }
    });

    let outcome = coordinator.run().await;

    write_csv_report(&outcome.pages, &report_path)
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    if !quiet {
        print_statistics(&outcome.statistics);
        println!(
            "\nReport written to {} ({} pages)",
            report_path.display(),
            outcome.pages.len()
        );
    }

    Ok(())
}
