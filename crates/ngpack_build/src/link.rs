//! Dependency-manager installation of built packages.

use std::path::Path;

use crate::context::BuildContext;

/// State of a package's dependency-manager-visible copy after a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The copy already existed; nothing was installed.
    Present,
    /// The copy was missing and the install step succeeded.
    Installed,
    /// The install step failed. The built output is still valid.
    Failed(String),
}

/// Installs `lib_dir` unless `module_dir` already exists.
///
/// Install errors are logged at verbose level and returned as
/// [`LinkStatus::Failed`], never propagated.
pub fn ensure_installed(ctx: &BuildContext<'_>, lib_dir: &Path, module_dir: &Path) -> LinkStatus {
    if module_dir.exists() {
        return LinkStatus::Present;
    }

    ctx.log.verbose(format_args!(
        "installing {} into {}...",
        lib_dir.display(),
        module_dir.display()
    ));
    match ctx.toolchain.install(lib_dir) {
        Ok(()) => LinkStatus::Installed,
        Err(e) => {
            ctx.log.verbose(&e);
            LinkStatus::Failed(e.to_string())
        }
    }
}
