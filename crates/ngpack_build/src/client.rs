//! Client sub-area: packages `client/` as an Angular library.

use ngpack_config::PackageDescriptor;
use ngpack_source::CandidateFile;

use crate::context::BuildContext;
use crate::error::BuildResult;
use crate::layout::PackageLayout;
use crate::link::ensure_installed;
use crate::report::AreaOutcome;
use crate::resolver::SubArea;

/// Architecture named in client log lines.
const CLIENT_ARCH: &str = "web.browser";

/// Packages the client library of one package if it is stale or missing.
///
/// Gated on `client/package.json`: without it the package has no client
/// library and no fingerprint record is touched.
pub fn build(
    ctx: &BuildContext<'_>,
    layout: &PackageLayout,
    files: &[&CandidateFile],
) -> BuildResult<AreaOutcome> {
    let unit = layout.unit();
    let descriptor_path = layout.client_descriptor();
    if !descriptor_path.exists() {
        ctx.log
            .verbose(format_args!("no client library in {unit}"));
        return Ok(AreaOutcome::Skipped);
    }
    let descriptor = PackageDescriptor::load(&descriptor_path)?;
    let lib_dir = layout.lib_dir();
    let module_dir = layout.module_dir(&descriptor);

    let stale = ctx.is_stale(&SubArea::Client.unit_name(unit), files)?;
    ctx.log
        .verbose(format_args!("Checking {unit} ({CLIENT_ARCH})..."));

    if !stale && lib_dir.exists() && module_dir.exists() {
        return Ok(AreaOutcome::UpToDate);
    }

    ctx.log.info(format_args!(
        "Building angular library from {unit} ({CLIENT_ARCH})..."
    ));
    ctx.toolchain
        .package_client(&layout.ng_package(), &layout.client_tsconfig())?;

    let link = ensure_installed(ctx, lib_dir, &module_dir);
    Ok(AreaOutcome::Built { link })
}
