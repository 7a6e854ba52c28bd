//! Event entry types.
//!
//! Entries are immutable once created: ownership moves to the buffer
//! on append and to the formatter on drain. Each entry carries a
//! unique id and its capture timestamp in milliseconds since the
//! Unix epoch.
//!
//! Format: `[timestamp] CATEGORY id=... key=value ...`, one line per
//! entry.

use chrono::DateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::error::RenderError;

/// An event that can be buffered and rendered to one log line.
pub trait EventRecord: Send + 'static {
    /// Capture time, milliseconds since the Unix epoch.
    fn timestamp_ms(&self) -> i64;

    /// Render the entry as a single line of text (no trailing
    /// newline). A failing render is replaced with a placeholder line
    /// by the logger; it never aborts the batch.
    fn render(&self) -> Result<String, RenderError>;
}

/// Render a millisecond timestamp as a UTC instant.
fn format_timestamp(timestamp_ms: i64) -> Result<String, RenderError> {
    let ts = DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
        RenderError::new(format!("timestamp out of range: {timestamp_ms}"))
    })?;
    Ok(ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Collapse a producer-supplied field onto one line.
fn flatten(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

/// A successful authentication.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSuccessEntry {
    /// Unique entry ID.
    pub entry_id: Uuid,
    /// Capture time (ms since epoch).
    pub timestamp_ms: i64,
    /// Description of the authenticated principal.
    pub principal: String,
}

impl AuthSuccessEntry {
    pub fn new(principal: impl Into<String>) -> Self {
        Self::with_timestamp(principal, chrono::Utc::now().timestamp_millis())
    }

    /// Create an entry with an explicit capture time.
    pub fn with_timestamp(principal: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            timestamp_ms,
            principal: principal.into(),
        }
    }
}

impl EventRecord for AuthSuccessEntry {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    fn render(&self) -> Result<String, RenderError> {
        Ok(format!(
            "[{}] AUTH_SUCCESS id={} principal={}",
            format_timestamp(self.timestamp_ms)?,
            self.entry_id,
            flatten(&self.principal),
        ))
    }
}

/// A rejected authentication attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AuthFailureEntry {
    /// Unique entry ID.
    pub entry_id: Uuid,
    /// Capture time (ms since epoch).
    pub timestamp_ms: i64,
    /// Description of the principal that failed to authenticate.
    pub principal: String,
    /// Why authentication was rejected.
    pub reason: String,
}

impl AuthFailureEntry {
    pub fn new(principal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_timestamp(principal, reason, chrono::Utc::now().timestamp_millis())
    }

    /// Create an entry with an explicit capture time.
    pub fn with_timestamp(
        principal: impl Into<String>,
        reason: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            timestamp_ms,
            principal: principal.into(),
            reason: reason.into(),
        }
    }
}

impl EventRecord for AuthFailureEntry {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    fn render(&self) -> Result<String, RenderError> {
        Ok(format!(
            "[{}] AUTH_FAILURE id={} principal={} reason=\"{}\"",
            format_timestamp(self.timestamp_ms)?,
            self.entry_id,
            flatten(&self.principal),
            flatten(&self.reason).replace('"', "'"),
        ))
    }
}

/// An exception suppressed from the client response and recorded
/// server-side instead.
#[derive(Debug, Clone, Serialize)]
pub struct HiddenExceptionEntry {
    /// Unique entry ID.
    pub entry_id: Uuid,
    /// Capture time (ms since epoch).
    pub timestamp_ms: i64,
    /// Exception type and message.
    pub exception: String,
    /// Hint about the request being served when it occurred.
    pub context: String,
}

impl HiddenExceptionEntry {
    pub fn new(exception: impl Into<String>, context: impl Into<String>) -> Self {
        Self::with_timestamp(exception, context, chrono::Utc::now().timestamp_millis())
    }

    /// Create an entry with an explicit capture time.
    pub fn with_timestamp(
        exception: impl Into<String>,
        context: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            timestamp_ms,
            exception: exception.into(),
            context: context.into(),
        }
    }
}

impl EventRecord for HiddenExceptionEntry {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    fn render(&self) -> Result<String, RenderError> {
        Ok(format!(
            "[{}] HIDDEN_EXCEPTION id={} context={} exception=\"{}\"",
            format_timestamp(self.timestamp_ms)?,
            self.entry_id,
            flatten(&self.context),
            flatten(&self.exception).replace('"', "'"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_success_render() {
        let entry = AuthSuccessEntry::with_timestamp("user:alice", 1_700_000_000_000);
        let line = entry.render().unwrap();

        assert!(line.contains("AUTH_SUCCESS"));
        assert!(line.contains("principal=user:alice"));
        assert!(line.contains(&entry.entry_id.to_string()));
        assert!(line.starts_with("[2023-11-14T"));
    }

    #[test]
    fn test_auth_failure_render_quotes_reason() {
        let entry = AuthFailureEntry::new("user:mallory", "bad \"password\"");
        let line = entry.render().unwrap();

        assert!(line.contains("AUTH_FAILURE"));
        assert!(line.contains("reason=\"bad 'password'\""));
    }

    #[test]
    fn test_hidden_exception_render_is_single_line() {
        let entry = HiddenExceptionEntry::new(
            "IllegalState: cursor closed\nat repository.rs:42",
            "GET /orders",
        );
        let line = entry.render().unwrap();

        assert!(!line.contains('\n'));
        assert!(line.contains("context=GET /orders"));
    }

    #[test]
    fn test_out_of_range_timestamp_fails_render() {
        let entry = AuthSuccessEntry::with_timestamp("user:alice", i64::MAX);
        assert!(entry.render().is_err());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = AuthSuccessEntry::new("user:alice");
        let b = AuthSuccessEntry::new("user:alice");
        assert_ne!(a.entry_id, b.entry_id);
    }
}
