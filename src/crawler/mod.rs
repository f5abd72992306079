//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that collapses failures to "no content"
//! - HTML parsing and link extraction
//! - The frontier queue and the global concurrency limiter
//! - Overall crawl coordination with dedup and a page budget

mod coordinator;
mod fetcher;
mod limiter;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, HttpFetcher, PageFetcher};
pub use limiter::ConcurrencyLimiter;
pub use parser::{extract_links, extract_page_data, parse_page, ParsedPage};
pub use scheduler::{Frontier, NextUrl};

use crate::config::Config;

/// Crawls the site at `base_url` over HTTP
///
/// This is the main entry point for a crawl. It will:
/// 1. Validate the base URL
/// 2. Build the HTTP client from the user agent settings
/// 3. Run the worker pool until the frontier drains or the page budget is hit
///
/// # Arguments
///
/// * `base_url` - Where the crawl starts; only pages on its host are fetched
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The recorded pages and run statistics
/// * `Err(RippleError)` - The crawl could not start
pub async fn crawl_site(base_url: &str, config: &Config) -> crate::Result<CrawlOutcome> {
    let coordinator = Coordinator::from_config(base_url, config)?;
    Ok(coordinator.run().await)
}
