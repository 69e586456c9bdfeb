//! Per-package compiler configuration (`tsconfig.pkg.json`) and the
//! [`CompilerOptions`] derived from it.

use serde_json::Value;

use crate::error::ConfigError;

/// Key of the options block inside `tsconfig.pkg.json`.
pub const OPTIONS_KEY: &str = "meteorNgCompilerOptions";

/// Module target whose output gets the secondary source transform.
const TRANSFORMED_MODULE: &str = "es2015";

/// Options controlling the pipeline's own behaviour for one package.
///
/// Built fresh for every package from a base value and the package's
/// configuration file, then passed by value to whatever needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Emit detail log lines in addition to the summary.
    pub verbose: bool,
}

impl CompilerOptions {
    /// Returns `self` overridden by the options block of `tsconfig`, if any.
    ///
    /// Only recognised keys holding a value of the expected type are taken.
    /// Anything else, including a block that is not an object, leaves the
    /// corresponding option unchanged.
    pub fn merged_with(self, tsconfig: &TsConfig) -> Self {
        let Some(block) = tsconfig.raw().get(OPTIONS_KEY).and_then(Value::as_object) else {
            return self;
        };
        Self {
            verbose: block
                .get("verbose")
                .and_then(Value::as_bool)
                .unwrap_or(self.verbose),
        }
    }
}

/// A parsed compiler configuration file.
///
/// Kept as a JSON value because the whole document is handed to the
/// transpiler unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TsConfig {
    raw: Value,
}

impl TsConfig {
    /// Parses a configuration document. It must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let raw: Value =
            serde_json::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        if !raw.is_object() {
            return Err(ConfigError::ValidationError(
                "compiler configuration must be a JSON object".to_string(),
            ));
        }
        Ok(Self { raw })
    }

    /// The full document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// `compilerOptions.module`, if set to a string.
    pub fn module(&self) -> Option<&str> {
        self.raw.get("compilerOptions")?.get("module")?.as_str()
    }

    /// Returns `true` if transpiled output must also go through the secondary transform.
    pub fn needs_transform(&self) -> bool {
        self.module()
            .is_some_and(|m| m.eq_ignore_ascii_case(TRANSFORMED_MODULE))
    }
}
