//! In-memory event buffer.

use std::sync::{Mutex, PoisonError};

/// Thread-safe, unbounded, append-only collection of pending entries
/// for one category.
///
/// `append` holds the lock for one push; `drain_all` swaps the whole
/// list out atomically. An append racing a drain lands either in the
/// drained batch or in the post-drain buffer, never both, never
/// neither.
#[derive(Debug)]
pub struct EventBuffer<E> {
    entries: Mutex<Vec<E>>,
}

impl<E> EventBuffer<E> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append an entry at the tail. Safe from any number of threads.
    pub fn append(&self, entry: E) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Atomically remove and return every pending entry, in insertion
    /// order, leaving the buffer empty.
    pub fn drain_all(&self) -> Vec<E> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Number of entries currently pending.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}
