//! Build pipeline error types.

use std::path::PathBuf;

use ngpack_cache::CacheError;
use ngpack_config::ConfigError;
use ngpack_source::SourceError;
use thiserror::Error;

/// Result alias used throughout the build pipeline.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that abort a build invocation.
///
/// Dependency-manager install failures are deliberately absent: they are
/// reported as [`LinkStatus::Failed`](crate::LinkStatus::Failed) and the
/// build carries on.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fingerprint record could not be written.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A configuration file or descriptor could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Package sources could not be enumerated.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A filesystem step around a tool invocation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A package lacks a configuration file a builder needs.
    #[error("package '{package}' has no {file}")]
    MissingConfig {
        /// The package unit name.
        package: String,
        /// The expected file.
        file: String,
    },

    /// An external tool ran and reported failure.
    #[error("{tool} failed: {reason}")]
    ToolFailed {
        /// Which tool.
        tool: String,
        /// Exit status or other detail.
        reason: String,
    },

    /// An external tool could not be started.
    #[error("failed to start {tool}: {source}")]
    ToolSpawn {
        /// Which tool.
        tool: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An external tool succeeded but its output could not be used.
    #[error("{tool} produced unusable output: {reason}")]
    InvalidToolOutput {
        /// Which tool.
        tool: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a tool failure
    pub fn tool_failed(tool: impl Into<String>, reason: impl ToString) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unusable-output error
    pub fn invalid_output(tool: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidToolOutput {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}
