//! Build-unit resolution: which packages take part, and which of their
//! files belong to which sub-area.
//!
//! Classification is by path convention and target architecture only:
//!
//! | Sub-area | Path prefix | Architecture |
//! |----------|-------------|--------------|
//! | shared   | `common/`   | any          |
//! | server   | `server/`   | not `web*`   |
//! | client   | `client/`   | `web*`       |
//!
//! Anything else is unclassified. Unclassified files are still read by the
//! builders when they are configuration, but by fixed path, not through the
//! partition.

use std::fmt;

use ngpack_common::unit_name;
use ngpack_source::CandidateFile;

/// Path prefix of shared code.
pub const SHARED_PREFIX: &str = "common/";
/// Path prefix of server code.
pub const SERVER_PREFIX: &str = "server/";
/// Path prefix of client library code.
pub const CLIENT_PREFIX: &str = "client/";
/// Architecture prefix of browser targets.
pub const BROWSER_ARCH_PREFIX: &str = "web";

/// Package-level compiler configuration; also marks a package as participating.
pub const PACKAGE_CONFIG: &str = "tsconfig.pkg.json";
/// Library compiler configuration; also marks a package as participating.
pub const LIBRARY_CONFIG: &str = "tsconfig.lib.json";

/// One of the three sub-areas of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubArea {
    /// Code shared by server and client, compiled to a library.
    Shared,
    /// Server code, transpiled file by file.
    Server,
    /// Client library code, packaged as an Angular library.
    Client,
}

impl SubArea {
    /// Suffix used in build unit names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Shared => "common",
            Self::Server => "server",
            Self::Client => "client",
        }
    }

    /// Name of the build unit for this sub-area of `package_unit`, e.g. `widgets.common`.
    pub fn unit_name(self, package_unit: &str) -> String {
        format!("{package_unit}.{}", self.suffix())
    }
}

impl fmt::Display for SubArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Classifies a file into its sub-area; `None` means unclassified.
pub fn classify(file: &CandidateFile) -> Option<SubArea> {
    let path = file.path_in_package();
    let browser = file.arch().starts_with(BROWSER_ARCH_PREFIX);

    if path.starts_with(SHARED_PREFIX) {
        Some(SubArea::Shared)
    } else if path.starts_with(SERVER_PREFIX) && !browser {
        Some(SubArea::Server)
    } else if path.starts_with(CLIENT_PREFIX) && browser {
        Some(SubArea::Client)
    } else {
        None
    }
}

/// Returns `true` if the file marks its package as participating.
fn is_marker(file: &CandidateFile) -> bool {
    matches!(file.basename(), PACKAGE_CONFIG | LIBRARY_CONFIG)
}

/// Discovers participating packages, as unit names in first-seen order.
///
/// A package participates when any of its files is a compiler configuration
/// marker; all other packages are ignored.
pub fn discover_packages(files: &[CandidateFile]) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for file in files.iter().filter(|f| is_marker(f)) {
        let unit = unit_name(file.package_name());
        if !units.contains(&unit) {
            units.push(unit);
        }
    }
    units
}

/// One package's files, split by sub-area.
#[derive(Debug, Clone, Default)]
pub struct Partition<'f> {
    /// The package unit name.
    pub unit: String,
    /// Shared files, in input order.
    pub shared: Vec<&'f CandidateFile>,
    /// Server files, in input order.
    pub server: Vec<&'f CandidateFile>,
    /// Client files, in input order.
    pub client: Vec<&'f CandidateFile>,
    /// The first package-level compiler configuration found, if any.
    pub config: Option<&'f CandidateFile>,
}

impl<'f> Partition<'f> {
    /// Partitions the files of `unit` out of the full candidate set.
    pub fn of(files: &'f [CandidateFile], unit: &str) -> Self {
        let mut partition = Partition {
            unit: unit.to_string(),
            ..Default::default()
        };

        for file in files.iter().filter(|f| unit_name(f.package_name()) == unit) {
            match classify(file) {
                Some(SubArea::Shared) => partition.shared.push(file),
                Some(SubArea::Server) => partition.server.push(file),
                Some(SubArea::Client) => partition.client.push(file),
                None => {}
            }
            if partition.config.is_none() && file.basename() == PACKAGE_CONFIG {
                partition.config = Some(file);
            }
        }
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(package: &str, arch: &str, path: &str) -> CandidateFile {
        CandidateFile::new(package, arch, path, "", "h", format!("packages/{package}/{path}"))
    }

    #[test]
    fn shared_ignores_architecture() {
        assert_eq!(classify(&file("w", "os", "common/a.ts")), Some(SubArea::Shared));
        assert_eq!(
            classify(&file("w", "web.browser", "common/a.ts")),
            Some(SubArea::Shared)
        );
    }

    #[test]
    fn server_requires_non_browser_arch() {
        assert_eq!(classify(&file("w", "os", "server/a.ts")), Some(SubArea::Server));
        assert_eq!(classify(&file("w", "web.browser", "server/a.ts")), None);
    }

    #[test]
    fn client_requires_browser_arch() {
        assert_eq!(
            classify(&file("w", "web.cordova", "client/a.ts")),
            Some(SubArea::Client)
        );
        assert_eq!(classify(&file("w", "os", "client/a.ts")), None);
    }

    #[test]
    fn other_paths_unclassified() {
        assert_eq!(classify(&file("w", "os", "tsconfig.pkg.json")), None);
        assert_eq!(classify(&file("w", "os", "lib/common/a.ts")), None);
        assert_eq!(classify(&file("w", "os", "commonx/a.ts")), None);
    }

    #[test]
    fn discovery_requires_marker() {
        let files = vec![
            file("plain", "os", "server/a.ts"),
            file("acme:widgets", "os", "server/a.ts"),
            file("acme:widgets", "os", "tsconfig.pkg.json"),
            file("gadgets", "os", "common/tsconfig.lib.json"),
        ];
        assert_eq!(discover_packages(&files), vec!["acme-widgets", "gadgets"]);
    }

    #[test]
    fn discovery_deduplicates() {
        let files = vec![
            file("w", "os", "tsconfig.pkg.json"),
            file("w", "os", "common/tsconfig.lib.json"),
            file("w", "os", "client/tsconfig.lib.json"),
        ];
        assert_eq!(discover_packages(&files), vec!["w"]);
    }

    #[test]
    fn partition_selects_package_and_area() {
        let files = vec![
            file("acme:w", "os", "common/a.ts"),
            file("acme:w", "os", "server/b.ts"),
            file("acme:w", "os", "client/c.ts"),
            file("acme:w", "os", "tsconfig.pkg.json"),
            file("other", "os", "common/z.ts"),
        ];
        let p = Partition::of(&files, "acme-w");
        assert_eq!(p.shared.len(), 1);
        assert_eq!(p.server.len(), 1);
        assert!(p.client.is_empty());
        assert_eq!(p.config.map(|f| f.path_in_package()), Some("tsconfig.pkg.json"));
        assert_eq!(p.server[0].path_in_package(), "server/b.ts");
    }

    #[test]
    fn partition_keeps_mixed_server_arches() {
        let files = vec![
            file("w", "os.linux", "server/a.ts"),
            file("w", "os.osx", "server/b.ts"),
        ];
        let p = Partition::of(&files, "w");
        assert_eq!(p.server.len(), 2);
    }

    #[test]
    fn unit_names() {
        assert_eq!(SubArea::Shared.unit_name("w"), "w.common");
        assert_eq!(SubArea::Client.unit_name("acme-w"), "acme-w.client");
        assert_eq!(SubArea::Server.to_string(), "server");
    }
}
