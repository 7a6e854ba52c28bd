//! Configuration types for Trail.
//!
//! Configuration can be loaded from a YAML file (trail.yaml) or built
//! programmatically. All fields have defaults so an empty document is
//! a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::Category;

/// Configuration for the batched event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// Whether event logging is enabled. When disabled, recording is a
    /// no-op and no files are touched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding the per-category log files.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Minimum seconds between the start of one opportunistic flush
    /// and eligibility of the next, per category.
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,

    /// Write human-readable lines to stderr instead of files
    /// (development mode).
    #[serde(default)]
    pub console: bool,
}

impl EventLogConfig {
    /// Resolve the sink file path for a category.
    pub fn sink_path(&self, category: Category) -> PathBuf {
        self.directory.join(category.file_name())
    }

    /// The flush window as milliseconds, the unit used by watermarks.
    pub fn flush_interval_ms(&self) -> i64 {
        (self.flush_interval_secs as i64).saturating_mul(1000)
    }
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
            flush_interval_secs: default_flush_interval_secs(),
            console: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_flush_interval_secs() -> u64 {
    600
}

/// Complete Trail configuration loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Configuration version.
    #[serde(default)]
    pub version: Option<String>,

    /// Event log settings.
    #[serde(default)]
    pub event_log: EventLogConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TrailConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}
