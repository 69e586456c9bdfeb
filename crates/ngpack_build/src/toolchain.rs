//! The seam between the pipeline and the external compilers, packager and
//! dependency manager.
//!
//! Builders only need to know whether a tool succeeded, plus the transpiled
//! text for server files. [`ProcessToolchain`] runs the commands named in
//! the driver configuration.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ngpack_config::{ToolCommand, ToolsConfig, TsConfig};
use ngpack_source::CandidateFile;
use serde::Deserialize;

use crate::error::{BuildError, BuildResult};

/// Output of transpiling one server file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    /// Emitted JavaScript.
    pub output_text: String,
    /// Source map as JSON text, if the transpiler produced one.
    pub source_map_text: Option<String>,
}

/// External tool invocations used by the sub-area builders.
pub trait Toolchain {
    /// Compiles shared code with `tsconfig`, emitting JavaScript and declarations into `out_dir`.
    fn compile_shared(&self, tsconfig: &Path, out_dir: &Path) -> BuildResult<()>;

    /// Packages the client library described by `ng_package` using `tsconfig`.
    fn package_client(&self, ng_package: &Path, tsconfig: &Path) -> BuildResult<()>;

    /// Installs the built package at `lib_dir` into the dependency manager's tree.
    fn install(&self, lib_dir: &Path) -> BuildResult<()>;

    /// Transpiles one server file under the package-level configuration.
    fn transpile(&self, file: &CandidateFile, tsconfig: &TsConfig) -> BuildResult<Transpiled>;

    /// Applies the secondary source transform to transpiled output.
    fn transform(&self, code: &str) -> BuildResult<String>;
}

/// Reply expected from the transpiler on stdout.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranspileReply {
    output_text: String,
    #[serde(default)]
    source_map_text: Option<String>,
}

/// [`Toolchain`] that runs configured commands from the project root.
#[derive(Debug, Clone)]
pub struct ProcessToolchain {
    root: PathBuf,
    tools: ToolsConfig,
}

impl ProcessToolchain {
    /// Creates a toolchain running `tools` with `root` as working directory.
    pub fn new(root: impl Into<PathBuf>, tools: ToolsConfig) -> Self {
        Self {
            root: root.into(),
            tools,
        }
    }

    fn command(&self, tool: &ToolCommand) -> Command {
        let mut cmd = Command::new(&tool.program);
        cmd.args(&tool.args).current_dir(&self.root);
        cmd
    }

    /// Runs a tool to completion with inherited stdio.
    fn run(&self, tool: &ToolCommand, args: &[&OsStr]) -> BuildResult<()> {
        let status = self
            .command(tool)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| BuildError::ToolSpawn {
                tool: tool.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(BuildError::tool_failed(&tool.program, status))
        }
    }

    /// Runs a tool feeding `input` on stdin and returns its stdout.
    fn pipe(&self, tool: &ToolCommand, input: String) -> BuildResult<String> {
        let mut child = self
            .command(tool)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| BuildError::ToolSpawn {
                tool: tool.program.clone(),
                source,
            })?;

        // Written from a separate thread so a child that streams output
        // before draining stdin cannot deadlock on a full pipe.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BuildError::tool_failed(&tool.program, "stdin unavailable"))?;
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| BuildError::tool_failed(&tool.program, e))?;
        let written = writer
            .join()
            .map_err(|_| BuildError::tool_failed(&tool.program, "stdin writer panicked"))?;

        if !output.status.success() {
            return Err(BuildError::tool_failed(&tool.program, output.status));
        }
        // A tool may exit before reading all of its input.
        match written {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                return Err(BuildError::tool_failed(&tool.program, e));
            }
            _ => {}
        }

        String::from_utf8(output.stdout)
            .map_err(|_| BuildError::invalid_output(&tool.program, "stdout is not UTF-8"))
    }
}

impl Toolchain for ProcessToolchain {
    fn compile_shared(&self, tsconfig: &Path, out_dir: &Path) -> BuildResult<()> {
        self.run(
            &self.tools.shared_compiler,
            &[
                OsStr::new("-p"),
                tsconfig.as_os_str(),
                OsStr::new("--outDir"),
                out_dir.as_os_str(),
                OsStr::new("-d"),
            ],
        )
    }

    fn package_client(&self, ng_package: &Path, tsconfig: &Path) -> BuildResult<()> {
        self.run(
            &self.tools.packager,
            &[
                OsStr::new("-p"),
                ng_package.as_os_str(),
                OsStr::new("-c"),
                tsconfig.as_os_str(),
            ],
        )
    }

    fn install(&self, lib_dir: &Path) -> BuildResult<()> {
        let lib_dir = std::path::absolute(lib_dir).map_err(|e| BuildError::io(lib_dir, e))?;
        self.run(
            &self.tools.installer,
            &[OsStr::new("install"), OsStr::new("-s"), lib_dir.as_os_str()],
        )
    }

    fn transpile(&self, file: &CandidateFile, tsconfig: &TsConfig) -> BuildResult<Transpiled> {
        let request = serde_json::json!({
            "fileName": file.display_path(),
            "source": file.content(),
            "options": tsconfig.raw(),
        });
        let stdout = self.pipe(&self.tools.transpiler, request.to_string())?;
        let reply: TranspileReply = serde_json::from_str(&stdout)
            .map_err(|e| BuildError::invalid_output(&self.tools.transpiler.program, e))?;
        Ok(Transpiled {
            output_text: reply.output_text,
            source_map_text: reply.source_map_text,
        })
    }

    fn transform(&self, code: &str) -> BuildResult<String> {
        self.pipe(&self.tools.transform, code.to_string())
    }
}
