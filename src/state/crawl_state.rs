use crate::url::NormalizedUrl;
use std::collections::{BTreeMap, HashSet};

/// Data recorded for one crawled page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRecord {
    /// URL the page was fetched from
    pub url: String,

    /// Trimmed text of the first `<h1>`, or empty
    pub h1: String,

    /// Trimmed text of the first paragraph (preferring one inside `<main>`), or empty
    pub first_paragraph: String,

    /// Absolute link targets in document order
    pub outgoing_links: Vec<String>,

    /// Absolute image sources in document order
    pub image_urls: Vec<String>,
}

/// Result of asking the crawl state for permission to fetch a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Key reserved for the caller, who must later record or release it
    Reserved,

    /// Key already recorded, reserved by another worker, or known to have no content
    Duplicate,

    /// Budget already filled by recorded pages; `newly_stopped` is true for
    /// the single caller that tripped the stop flag
    OverBudget { newly_stopped: bool },

    /// Budget filled only because of in-flight reservations; retry later
    Deferred,

    /// The crawl has been stopped
    Stopped,
}

/// Whether fan-out may continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Room {
    Available,
    Full { newly_stopped: bool },
}

/// Shared crawl bookkeeping
///
/// Holds the page map, the keys reserved by in-flight fetches and the stop
/// flag. Every method is synchronous; callers serialize access through a
/// single lock so that the check-then-reserve sequence is atomic.
///
/// Invariant: `pages.len() + reserved.len() <= page_budget`.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Recorded pages keyed by normalized URL
    pages: BTreeMap<NormalizedUrl, PageRecord>,

    /// Keys claimed by a worker between the gate and the record/release step
    reserved: HashSet<NormalizedUrl>,

    /// Keys whose fetch produced no content; they are not fetched again
    exhausted: HashSet<NormalizedUrl>,

    /// Hard cap on recorded pages
    page_budget: usize,

    /// Set once the budget is reached; never cleared
    stopped: bool,
}

impl CrawlState {
    /// Creates an empty state with the given page budget
    pub fn new(page_budget: usize) -> Self {
        Self {
            page_budget,
            ..Self::default()
        }
    }

    /// Checks dedup and budget for `key` and reserves it when both pass
    pub fn try_reserve(&mut self, key: &NormalizedUrl) -> Gate {
        if self.stopped {
            return Gate::Stopped;
        }

        if self.pages.contains_key(key)
            || self.reserved.contains(key)
            || self.exhausted.contains(key)
        {
            return Gate::Duplicate;
        }

        if self.pages.len() >= self.page_budget {
            return Gate::OverBudget {
                newly_stopped: self.stop(),
            };
        }

        if self.pages.len() + self.reserved.len() >= self.page_budget {
            return Gate::Deferred;
        }

        self.reserved.insert(key.clone());
        Gate::Reserved
    }

    /// Gives up a reservation without recording a page
    ///
    /// With `exhausted` set the key is remembered so it is not fetched again.
    pub fn release(&mut self, key: &NormalizedUrl, exhausted: bool) {
        self.reserved.remove(key);
        if exhausted {
            self.exhausted.insert(key.clone());
        }
    }

    /// Converts a reservation into a recorded page
    ///
    /// Returns false (and records nothing) if the crawl was stopped meanwhile
    /// or the key was not reserved.
    pub fn record(&mut self, key: NormalizedUrl, page: PageRecord) -> bool {
        if !self.reserved.remove(&key) || self.stopped {
            return false;
        }

        self.pages.insert(key, page);
        true
    }

    /// Checks whether more links may be queued; trips the stop flag once the
    /// budget is filled
    pub fn room(&mut self) -> Room {
        if self.stopped {
            return Room::Full {
                newly_stopped: false,
            };
        }

        if self.pages.len() >= self.page_budget {
            return Room::Full {
                newly_stopped: self.stop(),
            };
        }

        Room::Available
    }

    /// Sets the stop flag; returns true only on the first call
    pub fn stop(&mut self) -> bool {
        let newly = !self.stopped;
        self.stopped = true;
        newly
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    pub fn contains(&self, key: &NormalizedUrl) -> bool {
        self.pages.contains_key(key)
    }

    /// Moves the recorded pages out, leaving the map empty
    pub fn take_pages(&mut self) -> BTreeMap<NormalizedUrl, PageRecord> {
        std::mem::take(&mut self.pages)
    }
}
