//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - Writing the per-page CSV report
//! - Counting and printing crawl statistics

mod csv_report;
pub mod stats;

pub use csv_report::{format_csv_report, write_csv_report, write_report, REPORT_HEADERS};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = Result<T, OutputError>;
