//! Concurrency limiter for outbound fetches
//!
//! A thin wrapper over a fair `tokio` semaphore: at most `capacity` tasks run
//! at once, and waiting tasks are admitted in the order they asked.

use crate::RippleError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Bounds the number of simultaneously running fetches
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Arc<Semaphore>,

    capacity: usize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter admitting `capacity` concurrent tasks
    ///
    /// # Errors
    ///
    /// Returns `RippleError::ZeroConcurrency` when `capacity` is zero.
    pub fn new(capacity: usize) -> crate::Result<Self> {
        if capacity == 0 {
            return Err(RippleError::ZeroConcurrency);
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Runs `task` once a slot is free
    ///
    /// The future is not polled until a permit is held, so it does no work
    /// while queued. Returns `None` without running the task if the limiter
    /// has been closed.
    pub async fn run<Fut, T>(&self, task: Fut) -> Option<T>
    where
        Fut: Future<Output = T>,
    {
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::trace!("Limiter closed, dropping queued task");
                return None;
            }
        };

        Some(task.await)
    }

    /// Rejects all queued and future tasks; running tasks are unaffected
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of free slots right now
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
