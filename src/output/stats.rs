//! Crawl statistics
//!
//! Counts how each unit of crawl work ended. Failed fetches never reach the
//! report, so this is the only place their reasons show up.

use crate::state::TaskState;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Count of finished units by their final state
    pub units_by_state: BTreeMap<TaskState, u64>,

    /// Why fetches produced no content, keyed by outcome label
    pub no_content_reasons: BTreeMap<&'static str, u64>,

    /// Wall-clock duration of the crawl
    pub duration: Duration,
}

impl CrawlStatistics {
    /// Counts one unit that ended in `state`
    pub fn record_state(&mut self, state: TaskState) {
        *self.units_by_state.entry(state).or_insert(0) += 1;
    }

    /// Counts one fetch that produced no content
    pub fn record_no_content(&mut self, reason: &'static str) {
        *self.no_content_reasons.entry(reason).or_insert(0) += 1;
    }

    /// Number of units that ended in `state`
    pub fn count(&self, state: TaskState) -> u64 {
        self.units_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of pages recorded
    pub fn pages_recorded(&self) -> u64 {
        self.count(TaskState::Done)
    }

    /// Total units that reached a terminal state
    pub fn units_processed(&self) -> u64 {
        self.units_by_state
            .iter()
            .filter(|(state, _)| state.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }

    /// Pages recorded per second of crawl time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.pages_recorded() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Prints crawl statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages recorded: {}", stats.pages_recorded());
    println!("Units processed: {}", stats.units_processed());
    println!(
        "Duration: {:.2}s ({:.2} pages/sec)",
        stats.duration.as_secs_f64(),
        stats.pages_per_second()
    );

    println!("\nUnits by final state:");
    for (state, count) in &stats.units_by_state {
        println!("  {:<20} {}", state.as_str(), count);
    }

    if !stats.no_content_reasons.is_empty() {
        println!("\nFetches without content:");
        for (reason, count) in &stats.no_content_reasons {
            println!("  {:<20} {}", reason, count);
        }
    }
}
