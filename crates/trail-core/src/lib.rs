//! # trail-core
//!
//! Shared types for the Trail event logging workspace:
//! - The fixed set of event [`Category`] values, each backed by its own
//!   sink file, flush window, and buffer.
//! - Configuration types (`TrailConfig`, `EventLogConfig`) loadable
//!   from YAML.

pub mod category;
pub mod config;

pub use category::Category;
pub use config::{ConfigError, EventLogConfig, TrailConfig};
