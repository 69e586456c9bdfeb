//! Driver configuration loading and validation.

use crate::error::{read_file, ConfigError};
use crate::types::{ProjectConfig, ToolCommand};
use std::path::Path;

/// Name of the driver configuration file at the project root.
pub const CONFIG_FILE: &str = "ngpack.toml";

/// Loads and validates `<project_dir>/ngpack.toml`.
///
/// A missing file yields the default configuration.
pub fn load_config_or_default(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    match read_file(project_dir.join(CONFIG_FILE)) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.is_not_found() => Ok(ProjectConfig::default()),
        Err(e) => Err(e),
    }
}

/// Parses and validates a driver configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that directories and tools are named and at least one architecture is set.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    let project = &config.project;
    let dirs = [
        ("project.packages_dir", &project.packages_dir),
        ("project.dist_dir", &project.dist_dir),
        ("project.modules_dir", &project.modules_dir),
        ("project.cache_dir", &project.cache_dir),
        ("project.output_dir", &project.output_dir),
    ];
    for (field, value) in dirs {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
    }

    if project.architectures.is_empty() {
        return Err(ConfigError::ValidationError(
            "project.architectures must name at least one architecture".to_string(),
        ));
    }
    if project.architectures.iter().any(|a| a.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "project.architectures contains an empty name".to_string(),
        ));
    }

    let tools: [(&str, &ToolCommand); 5] = [
        ("tools.shared_compiler", &config.tools.shared_compiler),
        ("tools.packager", &config.tools.packager),
        ("tools.installer", &config.tools.installer),
        ("tools.transpiler", &config.tools.transpiler),
        ("tools.transform", &config.tools.transform),
    ];
    for (field, tool) in tools {
        if tool.program.is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
    }
    Ok(())
}
