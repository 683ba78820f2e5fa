use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A URL awaiting fetch, tagged with its BFS depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: usize,
}

/// Concurrency-safe queue of pending crawl tasks.
///
/// The queue itself is unbounded; total intake is bounded upstream by the
/// visited-set page gate, so producers never block. `close` is terminal:
/// waiters drain whatever is queued and then observe `None`.
#[derive(Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<CrawlTask>>,
    closed: AtomicBool,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a task. Pushing after close is a no-op.
    pub fn push(&self, task: CrawlTask) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.queue.lock().push_back(task);
        self.notify.notify_one();
    }

    /// Dequeue the next task, waiting while the queue is empty and open.
    /// Returns `None` once the frontier is closed and drained.
    pub async fn next(&self) -> Option<CrawlTask> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register interest before re-checking so a push or close that
            // lands between the check and the await still wakes us.
            notified.as_mut().enable();

            if let Some(task) = self.queue.lock().pop_front() {
                return Some(task);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            notified.await;
        }
    }

    /// Close the frontier and wake all waiters.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
