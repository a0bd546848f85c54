//! Error taxonomy for locator operations.
//!
//! Failure kinds stay discriminated so a caller trying several locator
//! variants in order can tell "this variant does not serve that path"
//! from a genuine transport failure. `last_modified` is the one
//! operation that never surfaces these; it degrades to
//! [`crate::FALLBACK_MODIFIED`] instead.

use thiserror::Error;

/// Error returned by locator construction, `open_stream`, and
/// `create_relative`.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A locator was constructed with an empty path.
    #[error("path cannot be empty")]
    EmptyPath,

    /// The path could not be parsed as a URL or filesystem path where
    /// one is required. Never retried.
    #[error("malformed path {path:?}: {reason}")]
    Malformed { path: String, reason: String },

    /// A wildcard pattern matched zero resources, or the target
    /// resource does not exist.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// A URL fetch completed with a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },

    /// Underlying transport or disk failure while opening or reading.
    /// Retry policy, if any, belongs to the caller.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LocateError {
    pub(crate) fn malformed(path: &str, reason: impl ToString) -> Self {
        LocateError::Malformed {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(path: &str) -> Self {
        LocateError::NotFound {
            path: path.to_string(),
        }
    }
}
