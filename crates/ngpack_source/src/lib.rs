//! Candidate files and the on-disk host enumeration that produces them.
//!
//! A [`CandidateFile`] is the unit of input handed to the build pipeline:
//! owning package, target architecture, path within the package, content
//! and a precomputed fingerprint. [`SourceTree`] builds the candidate set
//! for one architecture from a `packages/` directory.

#![warn(missing_docs)]

pub mod candidate;
pub mod error;
pub mod tree;

pub use candidate::CandidateFile;
pub use error::SourceError;
pub use tree::{SourceTree, CLAIMED_EXTENSIONS};
