//! Configuration for the ngpack build pipeline.
//!
//! Two kinds of configuration live here. The driver configuration
//! (`ngpack.toml`, parsed into [`ProjectConfig`]) names directories, target
//! architectures and external tool commands. The per-package files
//! (`tsconfig.pkg.json`, `package.json` descriptors) are JSON and are parsed
//! into [`TsConfig`], [`CompilerOptions`] and [`PackageDescriptor`].

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod loader;
pub mod options;
pub mod types;

pub use descriptor::PackageDescriptor;
pub use error::ConfigError;
pub use loader::{load_config_from_str, load_config_or_default, CONFIG_FILE};
pub use options::{CompilerOptions, TsConfig, OPTIONS_KEY};
pub use types::*;
