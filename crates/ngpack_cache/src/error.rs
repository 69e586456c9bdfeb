//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while persisting fingerprint records.
///
/// Reads are fail-safe: a missing or unreadable record loads as absent and
/// forces a rebuild. Only writes surface errors, and every write error is
/// fatal for the sub-area being evaluated.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while writing a record or creating the cache directory.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
