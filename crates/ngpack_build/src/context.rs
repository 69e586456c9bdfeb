//! State shared by the sub-area builders of one package.

use ngpack_cache::{StalenessOracle, Verdict};
use ngpack_source::CandidateFile;

use crate::error::BuildResult;
use crate::log::BuildLog;
use crate::toolchain::Toolchain;

/// Everything a sub-area builder needs besides its own files.
pub struct BuildContext<'a> {
    /// Staleness oracle over the project's fingerprint records.
    pub oracle: &'a StalenessOracle,
    /// External compilers, packager and dependency manager.
    pub toolchain: &'a dyn Toolchain,
    /// Logger bound to the package's compiler options.
    pub log: BuildLog,
}

impl BuildContext<'_> {
    /// Runs the staleness oracle for `unit`, logging how it decided.
    ///
    /// An empty file set is never checked and reports not stale, leaving the
    /// unit's record untouched.
    pub fn is_stale(&self, unit: &str, files: &[&CandidateFile]) -> BuildResult<bool> {
        if files.is_empty() {
            return Ok(false);
        }

        self.log.verbose(format_args!("comparing for: {unit}"));
        let verdict = self.oracle.check(unit, files)?;
        match &verdict {
            Verdict::NoRecord => self.log.verbose("no fingerprint record, creating one"),
            Verdict::CountChanged { previous, current } => self.log.verbose(format_args!(
                "file count changed: {previous} -> {current}"
            )),
            Verdict::Compared { diff, .. } => self.log.verbose(format_args!(
                "updated: {}\tunchanged: {}\tadded: {}\tdeleted: {}",
                diff.updated.len(),
                diff.unchanged.len(),
                diff.added.len(),
                diff.deleted.len()
            )),
        }
        Ok(verdict.is_stale())
    }
}
