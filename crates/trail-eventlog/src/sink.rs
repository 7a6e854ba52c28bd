//! Append-only sinks.
//!
//! A sink durably appends pre-formatted text for one category. The
//! flush gate already guarantees a single writer per category, so
//! sinks take `&mut self` and carry no internal synchronization.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::EventLogError;

/// Append pre-formatted text to durable storage.
pub trait Sink: Send {
    /// Append `text` to the target, creating it if absent, and ensure
    /// the write has reached the underlying medium before returning.
    /// The target is never truncated.
    fn append(&mut self, text: &str) -> Result<(), EventLogError>;
}

/// Appends to a file, created on first write.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn append(&mut self, text: &str) -> Result<(), EventLogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

/// Writes to stderr (development mode).
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn append(&mut self, text: &str) -> Result<(), EventLogError> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(text.as_bytes())?;
        stderr.flush()?;
        Ok(())
    }
}

/// Discards everything (disabled configuration).
#[derive(Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn append(&mut self, _text: &str) -> Result<(), EventLogError> {
        Ok(())
    }
}

/// Records appended chunks in memory behind a shared handle; used by
/// tests to count writes per window and audit the lines that were
/// "persisted".
#[derive(Debug, Default)]
pub struct MemorySink {
    chunks: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto the chunks recorded so far; stays valid after the
    /// sink itself is boxed and handed to a logger.
    pub fn chunks(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.chunks)
    }
}

impl Sink for MemorySink {
    fn append(&mut self, text: &str) -> Result<(), EventLogError> {
        self.chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
