//! Compiled server output and where it goes.

use ngpack_source::CandidateFile;
use serde_json::Value;

use crate::error::BuildResult;

/// JavaScript produced from one server file, ready for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledOutput {
    /// Path of the original file within its package.
    pub source_path: String,
    /// Target path within the package, with the extension swapped to `.js`.
    pub path: String,
    /// The JavaScript.
    pub data: String,
    /// Source map whose `sources` name the original display path.
    pub source_map: Option<Value>,
    /// Fingerprint of the original file.
    pub hash: String,
}

/// Receiver of compiled server output.
pub trait OutputSink {
    /// Registers `output` compiled from `file`.
    fn add_javascript(&mut self, file: &CandidateFile, output: CompiledOutput) -> BuildResult<()>;
}

/// One output held by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredOutput {
    /// Package identifier of the original file.
    pub package_name: String,
    /// Architecture the output was compiled for.
    pub arch: String,
    /// The output itself.
    pub output: CompiledOutput,
}

/// Sink that keeps every output in memory, in registration order.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Outputs registered so far.
    pub outputs: Vec<RegisteredOutput>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the output registered for `source_path`.
    pub fn get(&self, source_path: &str) -> Option<&CompiledOutput> {
        self.outputs
            .iter()
            .map(|r| &r.output)
            .find(|o| o.source_path == source_path)
    }
}

impl OutputSink for MemorySink {
    fn add_javascript(&mut self, file: &CandidateFile, output: CompiledOutput) -> BuildResult<()> {
        self.outputs.push(RegisteredOutput {
            package_name: file.package_name().to_string(),
            arch: file.arch().to_string(),
            output,
        });
        Ok(())
    }
}
