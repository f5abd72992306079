//! Configuration module for Site-Ripple
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a crawl can run without a
//! file at all.
//!
//! # Example
//!
//! ```no_run
//! use site_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Crawler will record at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_PAGES, DEFAULT_REPORT_PATH, DEFAULT_USER_AGENT, MAX_CONCURRENCY_CAP,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
