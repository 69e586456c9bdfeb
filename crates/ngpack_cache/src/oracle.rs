//! Staleness decisions for build units.
//!
//! The oracle compares a unit's current files with the record left by the
//! previous check and always replaces that record with the current state,
//! whatever the verdict. A unit that is never checked keeps its last record.

use std::path::PathBuf;

use ngpack_source::CandidateFile;

use crate::diff::RecordDiff;
use crate::error::CacheError;
use crate::record::{FingerprintRecord, FingerprintStore};

/// Outcome of one staleness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No usable record existed for the unit.
    NoRecord,

    /// The stored record and the current file set differ in size.
    CountChanged {
        /// Entries in the stored record.
        previous: usize,
        /// Files in the current set.
        current: usize,
    },

    /// Sizes matched, so the records were compared path by path.
    Compared {
        /// Per-path classification.
        diff: RecordDiff,
        /// Files in the current set.
        file_count: usize,
    },
}

impl Verdict {
    /// Returns `true` if the unit must be rebuilt.
    ///
    /// A compared unit is fresh only when every current file was found
    /// unchanged.
    pub fn is_stale(&self) -> bool {
        match self {
            Self::NoRecord | Self::CountChanged { .. } => true,
            Self::Compared { diff, file_count } => diff.unchanged.len() != *file_count,
        }
    }
}

/// Decides whether build units need rebuilding from their content fingerprints.
#[derive(Debug, Clone)]
pub struct StalenessOracle {
    store: FingerprintStore,
}

impl StalenessOracle {
    /// Creates an oracle keeping its records in `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: FingerprintStore::new(cache_dir),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    /// Checks `unit` against `files` and records `files` as its new state.
    ///
    /// Fails only if the new record cannot be written; the caller must not
    /// proceed with the unit's build in that case.
    pub fn check(&self, unit: &str, files: &[&CandidateFile]) -> Result<Verdict, CacheError> {
        let current = FingerprintRecord::from_files(files);

        let verdict = match self.store.load(unit) {
            None => Verdict::NoRecord,
            Some(previous) if previous.len() == files.len() => Verdict::Compared {
                diff: RecordDiff::between(&previous, &current),
                file_count: files.len(),
            },
            Some(previous) => Verdict::CountChanged {
                previous: previous.len(),
                current: files.len(),
            },
        };

        self.store.save(unit, &current)?;
        Ok(verdict)
    }

    /// Returns `true` if `unit` must be rebuilt. See [`check`](Self::check).
    pub fn is_stale(&self, unit: &str, files: &[&CandidateFile]) -> Result<bool, CacheError> {
        self.check(unit, files).map(|v| v.is_stale())
    }
}
