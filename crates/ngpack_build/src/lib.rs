//! Incremental build orchestration for mixed server/client package trees.
//!
//! The pipeline, per invocation:
//! 1. [`resolver`] discovers participating packages and partitions their
//!    files into the shared, server and client sub-areas
//! 2. the [`Orchestrator`] derives each package's [`CompilerOptions`] and
//!    runs the sub-area builders in the fixed order shared → server → client
//! 3. [`shared`] and [`client`] consult the staleness oracle and rebuild
//!    wholesale only when needed; [`server`] always transpiles
//!
//! External compilers, the packager and the dependency manager sit behind
//! the [`Toolchain`] trait.
//!
//! [`CompilerOptions`]: ngpack_config::CompilerOptions

#![warn(missing_docs)]

pub mod client;
pub mod context;
pub mod error;
pub mod layout;
pub mod link;
pub mod log;
pub mod orchestrator;
pub mod output;
pub mod report;
pub mod resolver;
pub mod server;
pub mod shared;
pub mod toolchain;

pub use context::BuildContext;
pub use error::{BuildError, BuildResult};
pub use layout::{PackageLayout, ProjectPaths};
pub use link::LinkStatus;
pub use log::BuildLog;
pub use orchestrator::Orchestrator;
pub use output::{CompiledOutput, MemorySink, OutputSink, RegisteredOutput};
pub use report::{AreaOutcome, InvocationReport, PackageReport};
pub use resolver::{classify, discover_packages, Partition, SubArea};
pub use toolchain::{ProcessToolchain, Toolchain, Transpiled};
