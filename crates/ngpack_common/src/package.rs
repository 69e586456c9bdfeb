//! Package identifier normalisation.

/// Separator between a package's namespace and its name (`owner:name`).
pub const NAMESPACE_SEPARATOR: char = ':';

/// Turns a package identifier into a filesystem-safe unit name.
///
/// The first namespace separator is replaced by a hyphen, so `acme:widgets`
/// becomes `acme-widgets`. Identifiers without a namespace are returned as-is.
/// The result names the package's source directory, its output directory and
/// the prefix of its fingerprint records.
pub fn unit_name(package_id: &str) -> String {
    package_id.replacen(NAMESPACE_SEPARATOR, "-", 1)
}
