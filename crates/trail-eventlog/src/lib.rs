//! # trail-eventlog
//!
//! Batched, time-windowed event logging for high-frequency in-process
//! events (authentication outcomes, exceptions suppressed from client
//! responses).
//!
//! This crate provides functionality for:
//! - Accumulating events in memory without serializing producers
//!   through disk I/O (`EventBuffer`)
//! - Electing at most one flusher per time window under concurrent
//!   producers (`FlushGate`)
//! - Appending formatted batches to durable per-category targets
//!   (`Sink`, `FileSink`)
//! - A producer-facing facade wiring one logger per category
//!   (`EventTrail`)
//!
//! ## Design
//!
//! There is no background thread or scheduler: whichever producer
//! thread happens to trip the flush window performs the flush inline.
//! Producers that only append take a short buffer lock; the flush lock
//! serializes drain + format + write for one category at a time.
//!
//! Durability is at-most-once: a batch drained for a flush that fails
//! to write is dropped, not re-queued, and the failure is reported on
//! a fallback channel (`tracing::error!`) so the primary request path
//! is never aborted by logging.
//!
//! ## Categories
//!
//! | Category | Recorded when |
//! |----------|---------------|
//! | `AuthSuccess` | a principal authenticates successfully |
//! | `AuthFailure` | an authentication attempt is rejected |
//! | `HiddenException` | an exception is suppressed from the client |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trail_core::EventLogConfig;
//! use trail_eventlog::EventTrail;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EventLogConfig::default();
//! let trail = EventTrail::new(&config)?;
//!
//! // Producers call these from any thread.
//! trail.record_auth_success("user:alice");
//! trail.record_auth_failure("user:mallory", "bad password");
//!
//! // Shutdown hook: push out the final partial batches.
//! trail.flush_all()?;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod entry;
pub mod error;
pub mod gate;
pub mod logger;
pub mod sink;
pub mod trail;

pub use buffer::EventBuffer;
pub use entry::{AuthFailureEntry, AuthSuccessEntry, EventRecord, HiddenExceptionEntry};
pub use error::{EventLogError, RenderError};
pub use gate::{FlushGate, FlushPermit};
pub use logger::BatchLogger;
pub use sink::{ConsoleSink, FileSink, MemorySink, NullSink, Sink};
pub use trail::EventTrail;
