//! URL handling module for Site-Ripple
//!
//! This module provides the deduplication key used by the crawler and the
//! host comparison that keeps a crawl on its base site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, is_same_host};
pub use normalize::{normalize_parsed, normalize_url, NormalizedUrl};
