//! Structural comparison of two fingerprint records.

use crate::record::FingerprintRecord;

/// Result of comparing a stored record against the current one.
///
/// Every path in either record lands in exactly one bucket. Buckets are in
/// path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDiff {
    /// Paths present only in the current record.
    pub added: Vec<String>,

    /// Paths present only in the stored record.
    pub deleted: Vec<String>,

    /// Paths present in both with different fingerprints.
    pub updated: Vec<String>,

    /// Paths present in both with identical fingerprints.
    pub unchanged: Vec<String>,
}

impl RecordDiff {
    /// Compares `old` against `new`.
    pub fn between(old: &FingerprintRecord, new: &FingerprintRecord) -> Self {
        let mut diff = Self::default();

        for (path, fingerprint) in new.iter() {
            match old.get(path) {
                Some(previous) if previous == fingerprint => diff.unchanged.push(path.to_string()),
                Some(_) => diff.updated.push(path.to_string()),
                None => diff.added.push(path.to_string()),
            }
        }

        diff.deleted = old
            .iter()
            .filter(|(path, _)| new.get(path).is_none())
            .map(|(path, _)| path.to_string())
            .collect();

        diff
    }

    /// Returns `true` if nothing was added, deleted or updated.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FingerprintRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn identical_records() {
        let r = record(&[("a.ts", "h1"), ("b.ts", "h2")]);
        let diff = RecordDiff::between(&r, &r);
        assert!(diff.is_empty());
        assert_eq!(diff.unchanged, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn classifies_every_bucket() {
        let old = record(&[("a.ts", "h1"), ("b.ts", "h2"), ("gone.ts", "h4")]);
        let new = record(&[("a.ts", "h1"), ("b.ts", "h3"), ("new.ts", "h5")]);
        let diff = RecordDiff::between(&old, &new);
        assert_eq!(diff.unchanged, vec!["a.ts"]);
        assert_eq!(diff.updated, vec!["b.ts"]);
        assert_eq!(diff.added, vec!["new.ts"]);
        assert_eq!(diff.deleted, vec!["gone.ts"]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn same_size_different_keys() {
        let old = record(&[("a.ts", "h1")]);
        let new = record(&[("b.ts", "h1")]);
        let diff = RecordDiff::between(&old, &new);
        assert_eq!(diff.added, vec!["b.ts"]);
        assert_eq!(diff.deleted, vec!["a.ts"]);
        assert!(diff.unchanged.is_empty());
    }

    #[test]
    fn empty_records() {
        let diff = RecordDiff::between(&FingerprintRecord::new(), &FingerprintRecord::new());
        assert!(diff.is_empty());
        assert!(diff.unchanged.is_empty());
    }
}
