//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors raised while reading `ngpack.toml` or a package's JSON files.
///
/// All of these abort the invocation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// TOML or JSON content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is present but unusable.
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Whether this is a read of a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Reads `path` to a string, attaching the path to any error.
pub(crate) fn read_file(path: impl Into<PathBuf>) -> Result<String, ConfigError> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
}
