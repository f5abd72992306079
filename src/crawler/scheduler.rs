//! Frontier queue for the crawl worker pool
//!
//! This module handles:
//! - The FIFO queue of discovered URLs waiting to be processed
//! - URLs parked because the page budget is fully reserved
//! - Counting active workers so termination is an explicit state

use std::collections::VecDeque;

/// What a worker should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextUrl {
    /// Process this URL; the caller is now counted as active
    Ready(String),

    /// Nothing queued but other workers are active and may enqueue more
    Wait,

    /// The crawl is over: stopped, or queue empty with no active worker
    Finished,
}

/// Frontier of URLs discovered but not yet processed
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs in discovery order
    queue: VecDeque<String>,

    /// URLs waiting for a reservation to resolve
    parked: Vec<String>,

    /// Workers currently processing a URL
    active: usize,
}

impl Frontier {
    /// Creates a frontier seeded with `initial`
    pub fn new(initial: impl IntoIterator<Item = String>) -> Self {
        Self {
            queue: initial.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends a discovered URL
    pub fn push(&mut self, url: String) {
        self.queue.push_back(url);
    }

    /// Sets a URL aside until [`Frontier::unpark_all`] is called
    pub fn park(&mut self, url: String) {
        self.parked.push(url);
    }

    /// Moves every parked URL to the back of the queue, returning how many moved
    pub fn unpark_all(&mut self) -> usize {
        let moved = self.parked.len();
        self.queue.extend(self.parked.drain(..));
        moved
    }

    /// Takes the next URL for a worker
    ///
    /// When `stopped` is set the crawl is finished regardless of what is
    /// still queued.
    pub fn next(&mut self, stopped: bool) -> NextUrl {
        if stopped {
            return NextUrl::Finished;
        }

        if self.queue.is_empty() && self.active == 0 {
            // Nobody is left to release a reservation, so parked URLs can run now
            self.unpark_all();
        }

        match self.queue.pop_front() {
            Some(url) => {
                self.active += 1;
                NextUrl::Ready(url)
            }
            None if self.active == 0 => NextUrl::Finished,
            None => NextUrl::Wait,
        }
    }

    /// Marks one worker as idle again
    pub fn complete(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(vec!["a".to_string(), "b".to_string()]);
        frontier.push("c".to_string());

        assert_eq!(frontier.next(false), NextUrl::Ready("a".to_string()));
        assert_eq!(frontier.next(false), NextUrl::Ready("b".to_string()));
        assert_eq!(frontier.next(false), NextUrl::Ready("c".to_string()));
        assert_eq!(frontier.active(), 3);
    }

    #[test]
    fn test_wait_while_workers_active() {
        let mut frontier = Frontier::new(vec!["a".to_string()]);
        assert_eq!(frontier.next(false), NextUrl::Ready("a".to_string()));
        assert_eq!(frontier.next(false), NextUrl::Wait);

        frontier.complete();
        assert_eq!(frontier.next(false), NextUrl::Finished);
        assert!(frontier.is_empty());
        assert_eq!(frontier.parked_len(), 0);
        assert_eq!(frontier.active(), 0);
    }

    #[test]
    fn test_stopped_finishes_with_queue_remaining() {
        let mut frontier = Frontier::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(frontier.next(true), NextUrl::Finished);
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_park_and_unpark() {
        let mut frontier = Frontier::new(Vec::new());
        frontier.push("a".to_string());
        let _ = frontier.next(false);

        frontier.park("b".to_string());
        assert_eq!(frontier.parked_len(), 1);
        assert_eq!(frontier.next(false), NextUrl::Wait);

        assert_eq!(frontier.unpark_all(), 1);
        assert_eq!(frontier.next(false), NextUrl::Ready("b".to_string()));
    }

    #[test]
    fn test_parked_released_when_no_worker_left() {
        let mut frontier = Frontier::new(Vec::new());
        frontier.park("late".to_string());
        assert_eq!(frontier.next(false), NextUrl::Ready("late".to_string()));
    }

    #[test]
    fn test_complete_never_underflows() {
        let mut frontier = Frontier::default();
        frontier.complete();
        assert_eq!(frontier.active(), 0);
    }
}
