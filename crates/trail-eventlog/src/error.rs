//! Error types for the event log crate.

use thiserror::Error;

/// An entry could not be rendered to a log line.
///
/// Rendering failures never abort a batch: the logger substitutes a
/// placeholder line for the offending entry.
#[derive(Debug, Error)]
#[error("failed to render entry: {reason}")]
pub struct RenderError {
    /// Why the entry could not be rendered.
    pub reason: String,
}

impl RenderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while flushing an event batch.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// Writing to the sink failed.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    /// A sink rejected the batch for a non-IO reason.
    #[error("sink error: {0}")]
    SinkRejected(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
