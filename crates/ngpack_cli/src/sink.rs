//! Writes compiled server output to the project's output directory.

use std::path::{Path, PathBuf};

use ngpack_build::{BuildError, BuildResult, CompiledOutput, OutputSink};
use ngpack_common::unit_name;
use ngpack_source::CandidateFile;

/// [`OutputSink`] laying files out as `<root>/<unit>/<arch>/<path>`, with
/// source maps beside them as `<path>.map`.
#[derive(Debug)]
pub struct DiskOutputSink {
    root: PathBuf,
    written: usize,
}

impl DiskOutputSink {
    /// Creates a sink writing under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Number of outputs written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn target(&self, file: &CandidateFile, output: &CompiledOutput) -> PathBuf {
        output
            .path
            .split('/')
            .fold(
                self.root.join(unit_name(file.package_name())).join(file.arch()),
                |dir, segment| dir.join(segment),
            )
    }
}

impl OutputSink for DiskOutputSink {
    fn add_javascript(&mut self, file: &CandidateFile, output: CompiledOutput) -> BuildResult<()> {
        let target = self.target(file, &output);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        write(&target, &output.data)?;

        if let Some(map) = &output.source_map {
            let mut map_path = target.into_os_string();
            map_path.push(".map");
            write(Path::new(&map_path), &map.to_string())?;
        }

        self.written += 1;
        Ok(())
    }
}

fn write(path: &Path, content: &str) -> BuildResult<()> {
    std::fs::write(path, content).map_err(|e| BuildError::io(path, e))
}
