//! Two-level build logging.

use std::fmt::Display;

use ngpack_config::CompilerOptions;

/// Prefix on every line so output can be picked out of a host's log stream.
pub const LOG_PREFIX: &str = "[ngpack]";

/// Logger bound to one package's [`CompilerOptions`].
///
/// `info` lines are the always-on summary; `verbose` lines appear only when
/// the options ask for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildLog {
    options: CompilerOptions,
}

impl BuildLog {
    /// Creates a logger for `options`.
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    /// Emits a summary line.
    pub fn info(&self, message: impl Display) {
        tracing::info!("{LOG_PREFIX} {message}");
    }

    /// Emits a detail line when verbose.
    pub fn verbose(&self, message: impl Display) {
        if self.options.verbose {
            tracing::info!("{LOG_PREFIX} {message}");
        }
    }
}
