//! Event categories.
//!
//! Each category is an independent logical log stream: it owns its own
//! in-memory buffer, flush watermark, and sink file. Nothing is shared
//! across categories, so a slow flush of one stream never blocks
//! another.

use serde::{Deserialize, Serialize};

/// The fixed set of event categories Trail records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A principal authenticated successfully.
    AuthSuccess,
    /// An authentication attempt was rejected.
    AuthFailure,
    /// An exception was suppressed from the client response and
    /// recorded server-side instead.
    HiddenException,
}

impl Category {
    /// All categories, in a stable order.
    pub const ALL: [Category; 3] = [
        Category::AuthSuccess,
        Category::AuthFailure,
        Category::HiddenException,
    ];

    /// File name of this category's sink target, relative to the
    /// configured log directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::AuthSuccess => "auth_success.log",
            Category::AuthFailure => "auth_failure.log",
            Category::HiddenException => "hidden_exceptions.log",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::AuthSuccess => write!(f, "AUTH_SUCCESS"),
            Category::AuthFailure => write!(f, "AUTH_FAILURE"),
            Category::HiddenException => write!(f, "HIDDEN_EXCEPTION"),
        }
    }
}
