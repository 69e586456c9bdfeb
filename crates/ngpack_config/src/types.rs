//! Driver configuration types deserialized from `ngpack.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The top-level driver configuration.
///
/// Every field has a default, so an empty file (or no file) is a valid
/// configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory layout and target architectures.
    pub project: ProjectSettings,
    /// External tool commands.
    pub tools: ToolsConfig,
}

/// Directory layout, relative to the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectSettings {
    /// Package sources: `<packages_dir>/<unit>/...`.
    pub packages_dir: String,
    /// Per-package build output: `<dist_dir>/<unit>`.
    pub dist_dir: String,
    /// Installed, dependency-manager-visible packages.
    pub modules_dir: String,
    /// Fingerprint records.
    pub cache_dir: String,
    /// Compiled server output written by the standalone driver.
    pub output_dir: String,
    /// Architectures to run the pipeline for, in order.
    pub architectures: Vec<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            packages_dir: "packages".to_string(),
            dist_dir: "dist".to_string(),
            modules_dir: "node_modules".to_string(),
            cache_dir: ".ngpack/cache".to_string(),
            output_dir: ".ngpack/out".to_string(),
            architectures: vec!["os".to_string(), "web.browser".to_string()],
        }
    }
}

/// Commands for the external collaborators the builders invoke.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Shared-code compiler (`tsc`-compatible flags).
    pub shared_compiler: ToolCommand,
    /// Client library packager (`ng-packagr`-compatible flags).
    pub packager: ToolCommand,
    /// Dependency manager used for `install` (`npm`-compatible).
    pub installer: ToolCommand,
    /// Per-file server transpiler speaking the JSON stdin/stdout protocol.
    pub transpiler: ToolCommand,
    /// Secondary source transform applied to ES2015-module output.
    pub transform: ToolCommand,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            shared_compiler: ToolCommand::new("tsc"),
            packager: ToolCommand::new("ng-packagr"),
            installer: ToolCommand::new("npm"),
            transpiler: ToolCommand::new("ngpack-transpile"),
            transform: ToolCommand::new("babel"),
        }
    }
}

/// A program plus leading arguments.
///
/// Accepts either a single string, split on whitespace
/// (`packager = "npx ng-packagr"`), or a list taken verbatim
/// (`packager = ["npx", "ng-packagr"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// The executable.
    pub program: String,
    /// Arguments placed before the step-specific ones.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Creates a command with no leading arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builds a command from its parts; the first part is the program.
    pub fn from_parts(parts: Vec<String>) -> Self {
        let mut iter = parts.into_iter();
        let program = iter.next().unwrap_or_default();
        Self {
            program,
            args: iter.collect(),
        }
    }

    /// Adds a leading argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl<'de> Deserialize<'de> for ToolCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_string_or_vec(deserializer).map(ToolCommand::from_parts)
    }
}

/// Deserializes a field that can be either a whitespace-separated string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.split_whitespace().map(str::to_string).collect())
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
