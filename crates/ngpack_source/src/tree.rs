//! On-disk enumeration of package sources.
//!
//! Plays the host's role when ngpack runs standalone: every directory under
//! the packages directory is one package, and every claimed file inside it
//! becomes a [`CandidateFile`] for the requested architecture.

use std::path::{Path, PathBuf};

use crate::candidate::CandidateFile;
use crate::error::SourceError;

/// File extensions handed to the build pipeline.
pub const CLAIMED_EXTENSIONS: &[&str] = &["ts", "html", "scss", "json"];

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Enumerates candidate files from a packages directory.
pub struct SourceTree;

impl SourceTree {
    /// Scans `<project_root>/<packages_dir>/*/` and returns candidates for `arch`.
    ///
    /// Packages are visited in directory-name order and files in path order,
    /// so the discovery order is stable for an unchanged tree. A missing
    /// packages directory yields an empty set.
    pub fn scan(
        project_root: &Path,
        packages_dir: &str,
        arch: &str,
    ) -> Result<Vec<CandidateFile>, SourceError> {
        let root = project_root.join(packages_dir);
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut packages = read_dir_sorted(&root)?;
        packages.retain(|p| p.is_dir() && !is_skipped(p));

        let mut files = Vec::new();
        for package_dir in packages {
            let Some(package) = file_name(&package_dir) else {
                continue;
            };
            let mut paths = Vec::new();
            walk_dir(&package_dir, &mut paths)?;
            paths.sort();

            for path in paths {
                let content = read_text(&path)?;
                let relative = to_slash(path.strip_prefix(&package_dir).unwrap_or(&path));
                let display = format!("{packages_dir}/{package}/{relative}");
                files.push(CandidateFile::hashed(
                    package.as_str(),
                    arch,
                    relative,
                    content,
                    display,
                ));
            }
        }
        Ok(files)
    }
}

/// Recursively collects claimed files below `dir`.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    for path in read_dir_sorted(dir)? {
        if path.is_dir() {
            if !is_skipped(&path) {
                walk_dir(&path, files)?;
            }
        } else if is_claimed(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let io_err = |source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        entries.push(entry.map_err(io_err)?.path());
    }
    entries.sort();
    Ok(entries)
}

fn read_text(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

fn is_claimed(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CLAIMED_EXTENSIONS.contains(&ext))
}

fn is_skipped(dir: &Path) -> bool {
    file_name(dir).is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_str()))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_packages_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = SourceTree::scan(dir.path(), "packages", "os").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn scans_claimed_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "packages/widgets/server/main.ts", "export {}");
        write(dir.path(), "packages/widgets/common/index.ts", "export {}");
        write(dir.path(), "packages/widgets/tsconfig.pkg.json", "{}");
        write(dir.path(), "packages/widgets/README.md", "# ignored");

        let files = SourceTree::scan(dir.path(), "packages", "os").unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path_in_package()).collect();
        assert_eq!(
            paths,
            vec!["common/index.ts", "server/main.ts", "tsconfig.pkg.json"]
        );
        assert!(files.iter().all(|f| f.package_name() == "widgets"));
        assert!(files.iter().all(|f| f.arch() == "os"));
        assert_eq!(files[0].display_path(), "packages/widgets/common/index.ts");
    }

    #[test]
    fn skips_node_modules_and_dot_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "packages/widgets/node_modules/x/index.ts", "");
        write(dir.path(), "packages/widgets/.cache/a.json", "{}");
        write(dir.path(), "packages/.hidden/common/a.ts", "");
        write(dir.path(), "packages/widgets/client/a.ts", "");

        let files = SourceTree::scan(dir.path(), "packages", "web.browser").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path_in_package(), "client/a.ts");
    }

    #[test]
    fn fingerprint_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "packages/w/common/a.ts", "one");
        let first = SourceTree::scan(dir.path(), "packages", "os").unwrap();
        write(dir.path(), "packages/w/common/a.ts", "two");
        let second = SourceTree::scan(dir.path(), "packages", "os").unwrap();
        assert_ne!(first[0].source_hash(), second[0].source_hash());
    }

    #[test]
    fn non_utf8_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packages/w/common/bad.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = SourceTree::scan(dir.path(), "packages", "os").unwrap_err();
        assert!(matches!(err, SourceError::NotUtf8 { .. }));
    }
}
