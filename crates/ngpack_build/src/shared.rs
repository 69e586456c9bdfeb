//! Shared sub-area: compiles `common/` into a library consumed by both the
//! server and the client.

use std::path::Path;

use ngpack_config::PackageDescriptor;
use ngpack_source::CandidateFile;

use crate::context::BuildContext;
use crate::error::{BuildError, BuildResult};
use crate::layout::{PackageLayout, DESCRIPTOR_FILE};
use crate::link::ensure_installed;
use crate::report::AreaOutcome;
use crate::resolver::{SubArea, SHARED_PREFIX};

/// Version written into a synthesized top-level descriptor.
const SYNTHESIZED_VERSION: &str = "0.0.1";

/// Builds the shared library of one package if it is stale or missing.
///
/// A package with neither shared files nor `common/package.json` has no
/// shared library and is skipped. Shared files without the descriptor are a
/// [`BuildError::MissingConfig`].
pub fn build(
    ctx: &BuildContext<'_>,
    layout: &PackageLayout,
    files: &[&CandidateFile],
) -> BuildResult<AreaOutcome> {
    let unit = layout.unit();
    ctx.log.verbose(format_args!("Checking {unit} (common)..."));
    ctx.log.verbose(format_args!("{} shared files", files.len()));

    let descriptor_path = layout.shared_descriptor();
    if !descriptor_path.exists() {
        if !files.is_empty() {
            return Err(BuildError::MissingConfig {
                package: unit.to_string(),
                file: format!("{SHARED_PREFIX}{DESCRIPTOR_FILE}"),
            });
        }
        ctx.log.verbose(format_args!("no shared library in {unit}"));
        return Ok(AreaOutcome::Skipped);
    }

    let stale = ctx.is_stale(&SubArea::Shared.unit_name(unit), files)?;
    let descriptor = PackageDescriptor::load(&descriptor_path)?;
    let lib_dir = layout.lib_dir();
    let module_dir = layout.module_dir(&descriptor);
    ctx.log
        .verbose(format_args!("installed copy: {}", module_dir.display()));

    if !stale && lib_dir.exists() && module_dir.exists() {
        return Ok(AreaOutcome::UpToDate);
    }

    ctx.log.info(format_args!("Building files from {unit} (common)..."));
    let out_dir = layout.shared_out_dir();
    ctx.toolchain
        .compile_shared(&layout.shared_tsconfig(), &out_dir)?;

    create_dir(&out_dir)?;
    let copied = out_dir.join(DESCRIPTOR_FILE);
    std::fs::copy(&descriptor_path, &copied).map_err(|e| BuildError::io(&copied, e))?;
    write_top_level_descriptor(lib_dir, &descriptor)?;

    let link = ensure_installed(ctx, lib_dir, &module_dir);
    Ok(AreaOutcome::Built { link })
}

/// Name of the library containing a shared descriptor's package.
fn library_name(shared_name: &str) -> String {
    shared_name.replacen("/common", "", 1)
}

/// Writes `<lib_dir>/package.json` unless one already exists.
fn write_top_level_descriptor(lib_dir: &Path, shared: &PackageDescriptor) -> BuildResult<()> {
    let path = lib_dir.join(DESCRIPTOR_FILE);
    if path.exists() {
        return Ok(());
    }
    let json = serde_json::json!({
        "name": library_name(&shared.name),
        "version": SYNTHESIZED_VERSION,
    });
    std::fs::write(&path, json.to_string()).map_err(|e| BuildError::io(&path, e))
}

fn create_dir(dir: &Path) -> BuildResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))
}
