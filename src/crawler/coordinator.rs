//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the worker pool that drives a crawl:
//! - Seeding the frontier with the base URL
//! - Gating each URL on dedup and the page budget under one lock
//! - Fetching through the concurrency limiter
//! - Recording page data and queueing outgoing links
//! - Stopping and cancelling in-flight fetches once the budget is reached

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchOutcome, HttpFetcher, PageFetcher};
use crate::crawler::limiter::ConcurrencyLimiter;
use crate::crawler::parser::parse_page;
use crate::crawler::scheduler::{Frontier, NextUrl};
use crate::output::CrawlStatistics;
use crate::state::{CrawlState, Gate, PageRecord, Room, TaskState};
use crate::url::{is_same_host, normalize_parsed, NormalizedUrl};
use crate::UrlError;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::Notify;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Final result of a crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Recorded pages keyed by normalized URL
    pub pages: BTreeMap<NormalizedUrl, PageRecord>,

    /// How every unit of work ended
    pub statistics: CrawlStatistics,
}

/// Everything workers mutate, kept behind one lock
#[derive(Debug)]
struct Shared {
    state: CrawlState,
    frontier: Frontier,
    stats: CrawlStatistics,
}

struct Inner<F> {
    base_url: Url,
    fetcher: F,
    limiter: ConcurrencyLimiter,
    shared: Mutex<Shared>,
    /// Signalled whenever the frontier or the stop flag changes
    wakeup: Notify,
    cancel: CancellationToken,
}

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    inner: Arc<Inner<F>>,
    workers: usize,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP using `config`
    pub fn from_config(base_url: &str, config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Self::new(base_url, fetcher, &config.crawler)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `base_url` - Where the crawl starts; also defines the allowed host
    /// * `fetcher` - Source of page bodies
    /// * `settings` - Concurrency, page budget and worker pool size
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(RippleError)` - The base URL is invalid or the limiter could not be built
    pub fn new(base_url: &str, fetcher: F, settings: &CrawlerConfig) -> crate::Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))?;
        // A base URL must produce a dedup key, which requires a host
        normalize_parsed(&base_url)?;

        let limiter = ConcurrencyLimiter::new(settings.max_concurrency)?;
        let shared = Shared {
            state: CrawlState::new(settings.max_pages),
            frontier: Frontier::new([base_url.to_string()]),
            stats: CrawlStatistics::default(),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                base_url,
                fetcher,
                limiter,
                shared: Mutex::new(shared),
                wakeup: Notify::new(),
                cancel: CancellationToken::new(),
            }),
            workers: settings.worker_count(),
        })
    }

    /// Token that stops the crawl when cancelled
    ///
    /// Cancelling from outside (for example on Ctrl-C) ends the crawl early
    /// with whatever pages were recorded so far.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.inner.cancel.clone()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Runs the crawl to completion
    ///
    /// Spawns the worker pool and waits for every worker to finish. Workers
    /// exit when the frontier is empty with no worker active, or once the
    /// crawl has been stopped.
    pub async fn run(self) -> CrawlOutcome {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} with {} workers, {} concurrent fetches, budget {} pages",
            self.inner.base_url,
            self.workers,
            self.inner.limiter.capacity(),
            self.inner.lock().state.page_budget()
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            workers.spawn(Arc::clone(&self.inner).worker_loop(worker_id));
        }

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                tracing::error!("Crawl worker failed: {}", e);
            }
        }

        let mut shared = self.inner.lock();
        let pages = shared.state.take_pages();
        let mut statistics = std::mem::take(&mut shared.stats);
        statistics.duration = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages recorded in {:?}",
            pages.len(),
            statistics.duration
        );

        CrawlOutcome { pages, statistics }
    }
}

impl<F: PageFetcher> Inner<F> {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        // State is only mutated in short synchronous sections, so a poisoned
        // lock still holds consistent data
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn worker_loop(self: Arc<Self>, worker_id: usize) {
        loop {
            // Register interest before checking the frontier so a push that
            // lands in between is not missed
            let notified = self.wakeup.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let next = {
                let mut shared = self.lock();
                let stopped = shared.state.is_stopped() || self.cancel.is_cancelled();
                shared.frontier.next(stopped)
            };

            match next {
                NextUrl::Ready(url) => {
                    tracing::trace!("Worker {} took {}", worker_id, url);
                    let state = self.process_url(&url).await;
                    self.finish_unit(url, state);
                }
                NextUrl::Wait => {
                    tokio::select! {
                        _ = &mut notified => {}
                        _ = self.cancel.cancelled() => {}
                    }
                }
                NextUrl::Finished => {
                    tracing::trace!("Worker {} finished", worker_id);
                    self.wakeup.notify_waiters();
                    break;
                }
            }
        }
    }

    /// Processes a single URL
    ///
    /// This method:
    /// 1. Bails out if the crawl is stopped
    /// 2. Normalizes the URL
    /// 3. Reserves the key if it is new and the budget allows
    /// 4. Checks the host against the base host
    /// 5. Fetches the page through the limiter
    /// 6. Records the page and queues its links
    async fn process_url(&self, url: &str) -> TaskState {
        let mut task = TaskState::Pending;

        if self.cancel.is_cancelled() || self.lock().state.is_stopped() {
            return advance(task, TaskState::Cancelled);
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Skipping invalid URL {}: {}", url, e);
                return advance(task, TaskState::SkippedInvalid);
            }
        };

        let key = match normalize_parsed(&parsed) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("Skipping URL {}: {}", url, e);
                return advance(task, TaskState::SkippedInvalid);
            }
        };

        let gate = self.lock().state.try_reserve(&key);
        match gate {
            Gate::Reserved => {}
            Gate::Duplicate => return advance(task, TaskState::SkippedDuplicate),
            Gate::Deferred => return advance(task, TaskState::Parked),
            Gate::Stopped => return advance(task, TaskState::Cancelled),
            Gate::OverBudget { newly_stopped } => {
                if newly_stopped {
                    self.trigger_stop();
                }
                return advance(task, TaskState::SkippedLimit);
            }
        }

        if !is_same_host(&parsed, &self.base_url) {
            tracing::debug!("Skipping {}: host differs from {}", url, self.base_url);
            self.lock().state.release(&key, false);
            return advance(task, TaskState::SkippedHost);
        }

        tracing::info!("crawling {}", url);

        let outcome = self
            .limiter
            .run(self.fetcher.fetch_html(&parsed, &self.cancel))
            .await
            .unwrap_or(FetchOutcome::Cancelled);
        task = advance(task, TaskState::Fetched);

        let html = match outcome {
            FetchOutcome::Html(html) => html,
            other => {
                tracing::debug!("No content from {}: {:?}", url, other);
                let mut shared = self.lock();
                // A cancelled fetch says nothing about the page itself
                let exhausted = other != FetchOutcome::Cancelled;
                shared.state.release(&key, exhausted);
                shared.stats.record_no_content(other.label());
                return advance(task, TaskState::SkippedNoContent);
            }
        };

        // Links to follow resolve against the base URL, the record's against the page
        let parsed_page = parse_page(&html, &parsed, &self.base_url);

        let mut newly_stopped = false;
        let mut queued = 0usize;
        {
            let mut shared = self.lock();
            if !shared.state.record(key, parsed_page.record) {
                tracing::debug!("Discarding {}: crawl stopped during fetch", url);
                return advance(task, TaskState::Cancelled);
            }
            task = advance(task, TaskState::Recorded);

            for link in parsed_page.fan_out_links {
                match shared.state.room() {
                    Room::Available => {
                        shared.frontier.push(link);
                        queued += 1;
                    }
                    Room::Full {
                        newly_stopped: newly,
                    } => {
                        newly_stopped = newly;
                        break;
                    }
                }
            }
        }
        task = advance(task, TaskState::FannedOut);

        tracing::debug!("Queued {} links from {}", queued, url);
        if newly_stopped {
            self.trigger_stop();
        }

        advance(task, TaskState::Done)
    }

    /// Books the end of a unit and wakes idle workers
    fn finish_unit(&self, url: String, state: TaskState) {
        {
            let mut shared = self.lock();
            shared.stats.record_state(state);
            if state == TaskState::Parked {
                shared.frontier.park(url);
            } else {
                // Any finished unit may have freed a reservation
                shared.frontier.unpark_all();
            }
            shared.frontier.complete();
        }
        self.wakeup.notify_waiters();
    }

    /// Stops the crawl: aborts in-flight fetches and rejects queued ones
    fn trigger_stop(&self) {
        tracing::info!("Reached max number of pages to crawl.");
        self.cancel.cancel();
        self.limiter.close();
        self.wakeup.notify_waiters();
    }
}

/// Moves a unit to its next state
fn advance(current: TaskState, next: TaskState) -> TaskState {
    debug_assert!(
        current.can_transition_to(next),
        "Invalid task transition: {} -> {}",
        current,
        next
    );
    tracing::trace!("{} -> {}", current, next);
    next
}
