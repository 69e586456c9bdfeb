//! `ngpack build`: one orchestrator pass per architecture.

use ngpack_build::{AreaOutcome, InvocationReport, Orchestrator, ProcessToolchain, ProjectPaths};
use ngpack_cache::StalenessOracle;
use ngpack_config::{load_config_or_default, CompilerOptions};
use ngpack_source::SourceTree;
use tracing::{debug, warn};

use crate::pipeline::resolve_project_root;
use crate::sink::DiskOutputSink;
use crate::{BuildArgs, GlobalArgs};

/// Runs the `ngpack build` command.
///
/// Install failures are reported as warnings and do not change the exit
/// code; any other failure aborts the remaining passes.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = load_config_or_default(&project_dir)?;
    let settings = &config.project;

    let arches = if args.arch.is_empty() {
        settings.architectures.clone()
    } else {
        args.arch.clone()
    };

    let toolchain = ProcessToolchain::new(&project_dir, config.tools.clone());
    let orchestrator = Orchestrator::new(
        ProjectPaths::new(&project_dir, settings),
        StalenessOracle::new(project_dir.join(&settings.cache_dir)),
        &toolchain,
    )
    .with_base_options(CompilerOptions {
        verbose: global.verbose,
    });
    let mut sink = DiskOutputSink::new(project_dir.join(&settings.output_dir));

    for arch in &arches {
        let files = SourceTree::scan(&project_dir, &settings.packages_dir, arch)?;
        debug!(arch = %arch, files = files.len(), "starting pass");
        let report = orchestrator.process_files(&files, &mut sink)?;

        for (unit, area, reason) in report.link_failures() {
            warn!("{unit} ({area}): install failed: {reason}");
        }
        if !global.quiet {
            eprintln!("{}", summary(arch, &report));
        }
    }

    if !global.quiet && sink.written() > 0 {
        eprintln!(
            "     Wrote {} server file(s) to {}",
            sink.written(),
            project_dir.join(&settings.output_dir).display()
        );
    }
    Ok(0)
}

/// One-line summary of a pass.
fn summary(arch: &str, report: &InvocationReport) -> String {
    let mut rebuilt = 0;
    let mut compiled = 0;
    for p in &report.packages {
        rebuilt += [&p.shared, &p.client].into_iter().filter(|o| o.did_work()).count();
        if let AreaOutcome::Compiled { files } = &p.server {
            compiled += *files;
        }
    }
    format!(
        "  Finished {arch}: {} package(s), {rebuilt} librar{} rebuilt, {compiled} server file(s) compiled",
        report.packages.len(),
        if rebuilt == 1 { "y" } else { "ies" }
    )
}
