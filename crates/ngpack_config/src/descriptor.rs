//! JSON package descriptors (`package.json`).

use std::path::Path;

use serde::Deserialize;

use crate::error::{read_file, ConfigError};

/// The fields of a package descriptor the pipeline reads.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Published name, possibly scoped (`@scope/name`).
    pub name: String,
    /// Published version.
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageDescriptor {
    /// Reads and parses the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError(reason) => {
                ConfigError::ParseError(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Parses a descriptor. `name` must be present and non-empty.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let descriptor: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        if descriptor.name.trim().is_empty() {
            return Err(ConfigError::MissingField("name".to_string()));
        }
        Ok(descriptor)
    }

    /// The name split on `/`, giving the nested directories it installs into.
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('/').filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scoped_descriptor() {
        let d = PackageDescriptor::parse(
            r#"{"name": "@acme/widgets", "version": "1.2.0", "private": true}"#,
        )
        .unwrap();
        assert_eq!(d.name, "@acme/widgets");
        assert_eq!(d.version.as_deref(), Some("1.2.0"));
        assert_eq!(d.name_segments().collect::<Vec<_>>(), vec!["@acme", "widgets"]);
    }

    #[test]
    fn version_optional() {
        let d = PackageDescriptor::parse(r#"{"name": "widgets"}"#).unwrap();
        assert!(d.version.is_none());
    }

    #[test]
    fn missing_name_errors() {
        let err = PackageDescriptor::parse(r#"{"version": "1.0.0"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn empty_name_errors() {
        let err = PackageDescriptor::parse(r#"{"name": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageDescriptor::load(&dir.path().join("package.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = PackageDescriptor::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(ref r) if r.contains("package.json")));
    }
}
