//! Fingerprint-based staleness tracking for build units.
//!
//! Each build unit (one package × one sub-area) owns a fingerprint record:
//! a JSON map from display path to content fingerprint stored in the cache
//! directory. The [`StalenessOracle`] compares a unit's current files against
//! its record, rewrites the record, and reports whether a rebuild is needed.

#![warn(missing_docs)]

pub mod diff;
pub mod error;
pub mod oracle;
pub mod record;

pub use diff::RecordDiff;
pub use error::CacheError;
pub use oracle::{StalenessOracle, Verdict};
pub use record::{FingerprintRecord, FingerprintStore};
