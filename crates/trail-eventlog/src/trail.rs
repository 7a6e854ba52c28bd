//! The producer-facing facade.
//!
//! `EventTrail` owns one `BatchLogger` per category, constructed once
//! at process start and handed to producers by reference. All mutable
//! state lives behind each category's buffer lock and flush gate; no
//! statics.

use std::fs;

use trail_core::{Category, EventLogConfig};

use crate::entry::{AuthFailureEntry, AuthSuccessEntry, HiddenExceptionEntry};
use crate::error::EventLogError;
use crate::logger::BatchLogger;
use crate::sink::{ConsoleSink, FileSink, NullSink, Sink};

/// One batched logger per event category.
///
/// Recording helpers never fail and never block beyond one bounded
/// inline flush. Categories are fully independent: a flush of one
/// stream never contends with another.
pub struct EventTrail {
    enabled: bool,
    auth_success: BatchLogger<AuthSuccessEntry>,
    auth_failure: BatchLogger<AuthFailureEntry>,
    hidden_exception: BatchLogger<HiddenExceptionEntry>,
}

impl EventTrail {
    /// Create the trail from configuration, creating the log directory
    /// if needed.
    pub fn new(config: &EventLogConfig) -> Result<Self, EventLogError> {
        if config.enabled && !config.console {
            fs::create_dir_all(&config.directory)?;
        }

        let interval_ms = config.flush_interval_ms();
        let sink_for = |category: Category| -> Box<dyn Sink> {
            if !config.enabled {
                Box::new(NullSink)
            } else if config.console {
                Box::new(ConsoleSink)
            } else {
                Box::new(FileSink::new(config.sink_path(category)))
            }
        };

        Ok(Self {
            enabled: config.enabled,
            auth_success: BatchLogger::new(
                Category::AuthSuccess,
                interval_ms,
                sink_for(Category::AuthSuccess),
            ),
            auth_failure: BatchLogger::new(
                Category::AuthFailure,
                interval_ms,
                sink_for(Category::AuthFailure),
            ),
            hidden_exception: BatchLogger::new(
                Category::HiddenException,
                interval_ms,
                sink_for(Category::HiddenException),
            ),
        })
    }

    /// Create a disabled (no-op) trail.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            auth_success: BatchLogger::new(Category::AuthSuccess, 0, Box::new(NullSink)),
            auth_failure: BatchLogger::new(Category::AuthFailure, 0, Box::new(NullSink)),
            hidden_exception: BatchLogger::new(
                Category::HiddenException,
                0,
                Box::new(NullSink),
            ),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a successful authentication.
    pub fn record_auth_success(&self, principal: &str) {
        if !self.enabled {
            return;
        }
        self.auth_success.record(AuthSuccessEntry::new(principal));
    }

    /// Record a rejected authentication attempt.
    pub fn record_auth_failure(&self, principal: &str, reason: &str) {
        if !self.enabled {
            return;
        }
        self.auth_failure
            .record(AuthFailureEntry::new(principal, reason));
    }

    /// Record an exception that was suppressed from the client
    /// response.
    pub fn record_hidden_exception(&self, exception: &impl std::fmt::Display, context: &str) {
        if !self.enabled {
            return;
        }
        self.hidden_exception
            .record(HiddenExceptionEntry::new(exception.to_string(), context));
    }

    /// Force-flush every category.
    ///
    /// Intended as the process shutdown hook so the final partial
    /// batches are not lost. Every category is attempted even when an
    /// earlier one fails; the first error is returned.
    pub fn flush_all(&self) -> Result<(), EventLogError> {
        let mut first_err = None;

        for result in [
            self.auth_success.flush_now(),
            self.auth_failure.flush_now(),
            self.hidden_exception.flush_now(),
        ] {
            if let Err(err) = result {
                tracing::error!(error = %err, "forced flush failed for a category");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The auth-success logger (introspection and tests).
    pub fn auth_success(&self) -> &BatchLogger<AuthSuccessEntry> {
        &self.auth_success
    }

    /// The auth-failure logger (introspection and tests).
    pub fn auth_failure(&self) -> &BatchLogger<AuthFailureEntry> {
        &self.auth_failure
    }

    /// The hidden-exception logger (introspection and tests).
    pub fn hidden_exception(&self) -> &BatchLogger<HiddenExceptionEntry> {
        &self.hidden_exception
    }
}
