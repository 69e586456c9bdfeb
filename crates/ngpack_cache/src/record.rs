//! Persistent fingerprint records, one JSON file per build unit.
//!
//! A record lives at `<cache_dir>/<unit>.json` and maps each file's display
//! path to its content fingerprint. Records are replaced whole through a
//! temporary file and a rename, so a crash leaves either the previous or the
//! new record on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ngpack_source::CandidateFile;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Extension of record files within the cache directory.
const RECORD_EXT: &str = "json";

/// Mapping from display path to content fingerprint for one build unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintRecord {
    entries: BTreeMap<String, String>,
}

impl FingerprintRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the record describing `files`.
    ///
    /// A display path appearing more than once keeps its last fingerprint.
    pub fn from_files(files: &[&CandidateFile]) -> Self {
        let entries = files
            .iter()
            .map(|f| (f.display_path().to_string(), f.source_hash().to_string()))
            .collect();
        Self { entries }
    }

    /// Returns the fingerprint recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no paths are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(path, fingerprint)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FingerprintRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }
}

/// File-backed store of fingerprint records keyed by build unit name.
#[derive(Debug, Clone)]
pub struct FingerprintStore {
    cache_dir: PathBuf,
}

impl FingerprintStore {
    /// Creates a store rooted at `cache_dir`. The directory is created on first save.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// The directory holding all record files.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the file path of the record for `unit`.
    pub fn record_path(&self, unit: &str) -> PathBuf {
        self.cache_dir.join(format!("{unit}.{RECORD_EXT}"))
    }

    /// Loads the record for `unit`, returning `None` if it doesn't exist.
    ///
    /// An unreadable or corrupt record is also `None`: the unit is then
    /// treated as never built, which costs a rebuild but never hides a change.
    pub fn load(&self, unit: &str) -> Option<FingerprintRecord> {
        let content = std::fs::read_to_string(self.record_path(unit)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Replaces the record for `unit`.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save(&self, unit: &str, record: &FingerprintRecord) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })?;
        let json = serde_json::to_string(record).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

        let path = self.record_path(unit);
        let tmp = self.cache_dir.join(format!("{unit}.{RECORD_EXT}.tmp"));
        std::fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Deletes every record in the store. Returns the number of records removed.
    ///
    /// A missing cache directory is not an error.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(CacheError::Io {
                    path: self.cache_dir.clone(),
                    source: e,
                })
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXT) {
                std::fs::remove_file(&path).map_err(|e| CacheError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
