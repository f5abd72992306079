//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskState`: the lifecycle of one unit of crawl work (pending, skipped, fetched, recorded, ...)
//! - `CrawlState`: the page map, in-flight reservations and the page budget
//! - `PageRecord`: the data recorded for a crawled page

mod crawl_state;
mod task_state;

// Re-export main types
pub use crawl_state::{CrawlState, Gate, PageRecord, Room};
pub use task_state::TaskState;
