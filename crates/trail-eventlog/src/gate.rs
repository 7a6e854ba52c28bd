//! Flush election.
//!
//! Many producer threads append entries; at most one of them per time
//! window may perform the flush. `FlushGate` decides the winner with a
//! check-lock-check-update sequence: a lock-free watermark read
//! rejects the overwhelmingly common "window not elapsed" case without
//! touching the mutex, and only a caller that also passes the
//! re-check under the lock gets the permit.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-category flush gate guarding the flush-only state `T` (the
/// category's sink).
///
/// The watermark records the start of the last granted flush, in
/// milliseconds since the Unix epoch, and starts at 0 so the first
/// event is always eligible.
#[derive(Debug)]
pub struct FlushGate<T> {
    watermark_ms: AtomicI64,
    interval_ms: i64,
    state: Mutex<T>,
}

/// Exclusive access to a category's flush state for the duration of
/// one drain + format + write. Dropping the permit releases the lock.
#[derive(Debug)]
pub struct FlushPermit<'a, T> {
    guard: MutexGuard<'a, T>,
}

impl<T> Deref for FlushPermit<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for FlushPermit<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> FlushGate<T> {
    pub fn new(interval_ms: i64, state: T) -> Self {
        Self {
            watermark_ms: AtomicI64::new(0),
            interval_ms,
            state: Mutex::new(state),
        }
    }

    /// Try to become the flusher for the current window.
    ///
    /// Returns a permit to at most one caller per eligible window. The
    /// watermark advances to `now_ms` before the permit is handed out,
    /// so a slow or failing flush does not reopen the window to a
    /// flood of redundant attempts.
    pub fn try_enter(&self, now_ms: i64) -> Option<FlushPermit<'_, T>> {
        // Fast rejection without the lock: the hot append path.
        if now_ms - self.watermark_ms.load(Ordering::Acquire) < self.interval_ms {
            return None;
        }

        // A held lock means a flush is in flight right now; that flush
        // already advanced the watermark, so this caller lost the
        // election rather than needing to wait behind the write.
        let guard = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(std::sync::TryLockError::WouldBlock) => return None,
        };

        // Another thread may have flushed between the fast check and
        // the lock; re-check under it.
        if now_ms - self.watermark_ms.load(Ordering::Acquire) < self.interval_ms {
            return None;
        }

        self.watermark_ms.store(now_ms, Ordering::Release);
        Some(FlushPermit { guard })
    }

    /// Enter unconditionally, regardless of elapsed time (forced
    /// flush, shutdown). Still mutually exclusive with every other
    /// flusher of this category, and still advances the watermark.
    pub fn force_enter(&self, now_ms: i64) -> FlushPermit<'_, T> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.watermark_ms.store(now_ms, Ordering::Release);
        FlushPermit { guard }
    }

    /// Start time of the last granted flush (ms since epoch).
    pub fn watermark_ms(&self) -> i64 {
        self.watermark_ms.load(Ordering::Acquire)
    }

    /// The configured window length in milliseconds.
    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }
}
