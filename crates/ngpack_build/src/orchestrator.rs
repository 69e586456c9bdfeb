//! Package iteration and sub-area sequencing for one build invocation.

use ngpack_cache::StalenessOracle;
use ngpack_config::{CompilerOptions, TsConfig};
use ngpack_source::CandidateFile;
use tracing::{debug, info_span};

use crate::context::BuildContext;
use crate::error::BuildResult;
use crate::layout::ProjectPaths;
use crate::log::BuildLog;
use crate::output::OutputSink;
use crate::report::{InvocationReport, PackageReport};
use crate::resolver::{discover_packages, Partition};
use crate::toolchain::Toolchain;
use crate::{client, server, shared};

/// Drives every discovered package through shared → server → client.
///
/// Packages are processed one after another in discovery order. The first
/// error from any builder aborts the invocation; install failures are not
/// errors and show up in the returned [`InvocationReport`] instead.
pub struct Orchestrator<'a> {
    paths: ProjectPaths,
    oracle: StalenessOracle,
    toolchain: &'a dyn Toolchain,
    base_options: CompilerOptions,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator with default base options.
    pub fn new(paths: ProjectPaths, oracle: StalenessOracle, toolchain: &'a dyn Toolchain) -> Self {
        Self {
            paths,
            oracle,
            toolchain,
            base_options: CompilerOptions::default(),
        }
    }

    /// Sets the options each package's configuration is merged over.
    pub fn with_base_options(mut self, options: CompilerOptions) -> Self {
        self.base_options = options;
        self
    }

    /// Processes one invocation's candidate files.
    pub fn process_files(
        &self,
        files: &[CandidateFile],
        sink: &mut dyn OutputSink,
    ) -> BuildResult<InvocationReport> {
        let units = discover_packages(files);
        debug!(packages = units.len(), files = files.len(), "discovered packages");

        let mut report = InvocationReport::default();
        for unit in &units {
            let _span = info_span!("package", unit = %unit).entered();
            report.packages.push(self.process_package(files, unit, sink)?);
        }

        BuildLog::new(self.base_options).verbose("done");
        Ok(report)
    }

    fn process_package(
        &self,
        files: &[CandidateFile],
        unit: &str,
        sink: &mut dyn OutputSink,
    ) -> BuildResult<PackageReport> {
        let partition = Partition::of(files, unit);
        let tsconfig = partition
            .config
            .map(|f| TsConfig::parse(f.content()))
            .transpose()?;
        let options = match &tsconfig {
            Some(tsconfig) => self.base_options.merged_with(tsconfig),
            None => self.base_options,
        };

        let ctx = BuildContext {
            oracle: &self.oracle,
            toolchain: self.toolchain,
            log: BuildLog::new(options),
        };
        let layout = self.paths.package(unit);

        ctx.log.verbose(format_args!("processing files for {unit}"));
        ctx.log.verbose("processing common");
        let shared = shared::build(&ctx, &layout, &partition.shared)?;
        ctx.log.verbose("processing server");
        let server = server::build(&ctx, &layout, &partition.server, tsconfig.as_ref(), sink)?;
        ctx.log.verbose("processing client");
        let client = client::build(&ctx, &layout, &partition.client)?;
        ctx.log.verbose("pkg process done");

        Ok(PackageReport {
            unit: unit.to_string(),
            shared,
            server,
            client,
        })
    }
}
