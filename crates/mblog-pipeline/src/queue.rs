//! In-memory derivation queue.

use std::collections::VecDeque;

use parking_lot::Mutex;

use mblog_models::MediaId;

/// One pending derivation: the raw uploaded bytes plus the identifier
/// they were submitted under.
///
/// Owned by the queue until dequeued, then by the worker until the
/// cycle ends; there is no retry queue, so a failed item is simply
/// dropped.
#[derive(Debug)]
pub struct WorkItem {
    pub id: MediaId,
    pub raw: Vec<u8>,
}

/// Unbounded FIFO of pending work.
///
/// Safe for many concurrent producers and a single consumer. Pushes
/// never block and never fail; memory is the only limit, which is the
/// documented contract (no backpressure signal to producers).
#[derive(Debug, Default)]
pub struct DerivationQueue {
    inner: Mutex<VecDeque<WorkItem>>,
}

impl DerivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an item. Non-blocking, infallible.
    pub fn push(&self, item: WorkItem) {
        self.inner.lock().push_back(item);
    }

    /// Dequeue the oldest item, if any.
    pub fn pop(&self) -> Option<WorkItem> {
        self.inner.lock().pop_front()
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
