//! The candidate file model.

use ngpack_common::ContentHash;

/// A single input file offered to the build pipeline for one architecture.
///
/// Immutable for the duration of an invocation. `display_path` is the stable
/// identity key under which the file's fingerprint is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    package_name: String,
    arch: String,
    path_in_package: String,
    basename: String,
    content: String,
    source_hash: String,
    display_path: String,
}

impl CandidateFile {
    /// Creates a candidate file with an externally supplied fingerprint.
    ///
    /// `path_in_package` uses `/` separators; the basename is its last segment.
    pub fn new(
        package_name: impl Into<String>,
        arch: impl Into<String>,
        path_in_package: impl Into<String>,
        content: impl Into<String>,
        source_hash: impl Into<String>,
        display_path: impl Into<String>,
    ) -> Self {
        let path_in_package = path_in_package.into();
        let basename = path_in_package
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            package_name: package_name.into(),
            arch: arch.into(),
            path_in_package,
            basename,
            content: content.into(),
            source_hash: source_hash.into(),
            display_path: display_path.into(),
        }
    }

    /// Creates a candidate file whose fingerprint is the content's [`ContentHash`].
    pub fn hashed(
        package_name: impl Into<String>,
        arch: impl Into<String>,
        path_in_package: impl Into<String>,
        content: impl Into<String>,
        display_path: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let hash = ContentHash::from_bytes(content.as_bytes()).to_hex();
        Self::new(
            package_name,
            arch,
            path_in_package,
            content,
            hash,
            display_path,
        )
    }

    /// The owning package identifier, possibly namespaced (`owner:name`).
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The target architecture, e.g. `os` or `web.browser`.
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Path relative to the package root.
    pub fn path_in_package(&self) -> &str {
        &self.path_in_package
    }

    /// Final path segment.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content fingerprint.
    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }

    /// Stable identity used as the fingerprint record key.
    pub fn display_path(&self) -> &str {
        &self.display_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_is_last_segment() {
        let f = CandidateFile::new("w", "os", "server/api/main.ts", "", "h", "d");
        assert_eq!(f.basename(), "main.ts");
    }

    #[test]
    fn basename_of_top_level_file() {
        let f = CandidateFile::new("w", "os", "tsconfig.pkg.json", "{}", "h", "d");
        assert_eq!(f.basename(), "tsconfig.pkg.json");
    }

    #[test]
    fn hashed_uses_content_hash() {
        let f = CandidateFile::hashed("w", "os", "common/a.ts", "let a;", "packages/w/common/a.ts");
        assert_eq!(f.source_hash(), ContentHash::from_bytes(b"let a;").to_hex());
        assert_eq!(f.display_path(), "packages/w/common/a.ts");
    }
}
