//! Error types for source enumeration.

use std::path::PathBuf;

/// Errors that can occur while enumerating package sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A claimed source file is not valid UTF-8 text.
    #[error("{path} is not valid UTF-8")]
    NotUtf8 {
        /// The offending file.
        path: PathBuf,
    },
}
