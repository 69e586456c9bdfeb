//! Shared foundational types used across the ngpack build pipeline.
//!
//! This crate provides content hashing for source fingerprints and the
//! normalisation that turns a package identifier into a filesystem-safe
//! unit name.

#![warn(missing_docs)]

pub mod hash;
pub mod package;

pub use hash::ContentHash;
pub use package::{unit_name, NAMESPACE_SEPARATOR};
