//! Batch logger.
//!
//! The producer-facing core for one category: `record` appends and
//! opportunistically flushes, `flush_now` flushes unconditionally.
//! There is no background thread; the flush runs inline on whichever
//! producer thread trips the window boundary.

use chrono::Utc;
use trail_core::Category;

use crate::buffer::EventBuffer;
use crate::entry::EventRecord;
use crate::error::EventLogError;
use crate::gate::FlushGate;
use crate::sink::Sink;

/// Batched logger for one event category.
///
/// Appends are lock-minimal and never wait on disk I/O; the one
/// producer per window that wins the flush gate pays the drain +
/// format + write cost inline. A batch drained for a flush that fails
/// is dropped, not re-queued (at-most-once durability).
pub struct BatchLogger<E: EventRecord> {
    category: Category,
    buffer: EventBuffer<E>,
    gate: FlushGate<Box<dyn Sink>>,
}

impl<E: EventRecord> BatchLogger<E> {
    /// Create a logger flushing to `sink` at most once per
    /// `interval_ms` (forced flushes excepted).
    pub fn new(category: Category, interval_ms: i64, sink: Box<dyn Sink>) -> Self {
        Self {
            category,
            buffer: EventBuffer::new(),
            gate: FlushGate::new(interval_ms, sink),
        }
    }

    /// Record one entry: append, then flush inline if this call trips
    /// the window boundary.
    ///
    /// Never fails and never aborts the caller's primary work: a sink
    /// failure on this path is reported via `tracing::error!` and the
    /// failed batch is dropped.
    pub fn record(&self, entry: E) {
        self.buffer.append(entry);

        let now_ms = Utc::now().timestamp_millis();
        if let Some(mut permit) = self.gate.try_enter(now_ms) {
            if let Err(err) = self.write_batch(&mut **permit) {
                tracing::error!(
                    category = %self.category,
                    error = %err,
                    "event batch flush failed; batch dropped"
                );
            }
        }
    }

    /// Flush unconditionally, regardless of the window.
    ///
    /// Returns the number of lines written. An empty buffer still
    /// advances the watermark and writes nothing.
    pub fn flush_now(&self) -> Result<usize, EventLogError> {
        let now_ms = Utc::now().timestamp_millis();
        let mut permit = self.gate.force_enter(now_ms);
        self.write_batch(&mut **permit)
    }

    /// Drain, format, and write one batch. Caller must hold the flush
    /// permit for this category.
    fn write_batch(&self, sink: &mut dyn Sink) -> Result<usize, EventLogError> {
        let batch = self.buffer.drain_all();
        if batch.is_empty() {
            return Ok(0);
        }

        let mut text = String::new();
        for entry in &batch {
            match entry.render() {
                Ok(line) => text.push_str(&line),
                Err(err) => {
                    // One bad entry never aborts the batch.
                    text.push_str(&format!(
                        "[ts={}ms] {} <unrenderable entry: {}>",
                        entry.timestamp_ms(),
                        self.category,
                        err
                    ));
                }
            }
            text.push('\n');
        }

        sink.append(&text)?;
        tracing::debug!(
            category = %self.category,
            entries = batch.len(),
            "flushed event batch"
        );
        Ok(batch.len())
    }

    /// Entries currently waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Start time of the last flush (ms since epoch), 0 before the
    /// first one.
    pub fn watermark_ms(&self) -> i64 {
        self.gate.watermark_ms()
    }

    pub fn category(&self) -> Category {
        self.category
    }
}
