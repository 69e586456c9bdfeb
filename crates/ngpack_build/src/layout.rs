//! Filesystem layout of package sources, outputs and installed copies.

use std::path::{Path, PathBuf};

use ngpack_config::{PackageDescriptor, ProjectSettings};

use crate::resolver::LIBRARY_CONFIG;

/// Package descriptor file name.
pub const DESCRIPTOR_FILE: &str = "package.json";
/// Client packaging descriptor file name.
pub const NG_PACKAGE_FILE: &str = "ng-package.json";

/// Absolute roots of a project's directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    packages_dir: PathBuf,
    dist_dir: PathBuf,
    modules_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolves `settings` against `root`.
    pub fn new(root: impl Into<PathBuf>, settings: &ProjectSettings) -> Self {
        let root = root.into();
        Self {
            packages_dir: root.join(&settings.packages_dir),
            dist_dir: root.join(&settings.dist_dir),
            modules_dir: root.join(&settings.modules_dir),
        }
    }

    /// Layout of one package.
    pub fn package(&self, unit: &str) -> PackageLayout {
        PackageLayout {
            unit: unit.to_string(),
            source_dir: self.packages_dir.join(unit),
            lib_dir: self.dist_dir.join(unit),
            modules_dir: self.modules_dir.clone(),
        }
    }
}

/// Fixed paths of one package's configuration and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    unit: String,
    source_dir: PathBuf,
    lib_dir: PathBuf,
    modules_dir: PathBuf,
}

impl PackageLayout {
    /// The package unit name.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// `<dist>/<unit>`, the package's output directory.
    pub fn lib_dir(&self) -> &Path {
        &self.lib_dir
    }

    /// `<packages>/<unit>/common/package.json`
    pub fn shared_descriptor(&self) -> PathBuf {
        self.source_dir.join("common").join(DESCRIPTOR_FILE)
    }

    /// `<packages>/<unit>/common/tsconfig.lib.json`
    pub fn shared_tsconfig(&self) -> PathBuf {
        self.source_dir.join("common").join(LIBRARY_CONFIG)
    }

    /// `<dist>/<unit>/common`, where the shared compiler emits.
    pub fn shared_out_dir(&self) -> PathBuf {
        self.lib_dir.join("common")
    }

    /// `<packages>/<unit>/client/package.json`
    pub fn client_descriptor(&self) -> PathBuf {
        self.source_dir.join("client").join(DESCRIPTOR_FILE)
    }

    /// `<packages>/<unit>/client/tsconfig.lib.json`
    pub fn client_tsconfig(&self) -> PathBuf {
        self.source_dir.join("client").join(LIBRARY_CONFIG)
    }

    /// `<packages>/<unit>/client/ng-package.json`
    pub fn ng_package(&self) -> PathBuf {
        self.source_dir.join("client").join(NG_PACKAGE_FILE)
    }

    /// Where the dependency manager places the package `descriptor` names.
    pub fn module_dir(&self, descriptor: &PackageDescriptor) -> PathBuf {
        descriptor
            .name_segments()
            .fold(self.modules_dir.clone(), |dir, segment| dir.join(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PackageLayout {
        ProjectPaths::new("/proj", &ProjectSettings::default()).package("acme-widgets")
    }

    #[test]
    fn source_paths() {
        let l = layout();
        assert_eq!(l.unit(), "acme-widgets");
        assert_eq!(
            l.shared_descriptor(),
            PathBuf::from("/proj/packages/acme-widgets/common/package.json")
        );
        assert_eq!(
            l.shared_tsconfig(),
            PathBuf::from("/proj/packages/acme-widgets/common/tsconfig.lib.json")
        );
        assert_eq!(
            l.ng_package(),
            PathBuf::from("/proj/packages/acme-widgets/client/ng-package.json")
        );
        assert_eq!(
            l.client_tsconfig(),
            PathBuf::from("/proj/packages/acme-widgets/client/tsconfig.lib.json")
        );
    }

    #[test]
    fn output_paths() {
        let l = layout();
        assert_eq!(l.lib_dir(), Path::new("/proj/dist/acme-widgets"));
        assert_eq!(
            l.shared_out_dir(),
            PathBuf::from("/proj/dist/acme-widgets/common")
        );
    }

    #[test]
    fn scoped_module_dir_is_nested() {
        let d = PackageDescriptor::parse(r#"{"name": "@acme/widgets/common"}"#).unwrap();
        assert_eq!(
            layout().module_dir(&d),
            PathBuf::from("/proj/node_modules/@acme/widgets/common")
        );
    }

    #[test]
    fn custom_settings() {
        let settings = ProjectSettings {
            packages_dir: "src/pkgs".to_string(),
            dist_dir: "build".to_string(),
            ..ProjectSettings::default()
        };
        let l = ProjectPaths::new("/p", &settings).package("w");
        assert_eq!(l.shared_descriptor(), Path::new("/p/src/pkgs/w/common/package.json"));
        assert_eq!(l.lib_dir(), Path::new("/p/build/w"));
    }
}
