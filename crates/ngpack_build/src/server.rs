//! Server sub-area: transpiles every server file and hands the result to the
//! host's output sink.
//!
//! There is no staleness check here. Each invocation recompiles the whole
//! server partition.

use ngpack_config::TsConfig;
use ngpack_source::CandidateFile;
use serde_json::Value;

use crate::context::BuildContext;
use crate::error::{BuildError, BuildResult};
use crate::layout::PackageLayout;
use crate::output::{CompiledOutput, OutputSink};
use crate::report::AreaOutcome;
use crate::resolver::PACKAGE_CONFIG;

/// Compiles `files` with the package-level `tsconfig` into `sink`.
pub fn build(
    ctx: &BuildContext<'_>,
    layout: &PackageLayout,
    files: &[&CandidateFile],
    tsconfig: Option<&TsConfig>,
    sink: &mut dyn OutputSink,
) -> BuildResult<AreaOutcome> {
    let Some(first) = files.first() else {
        return Ok(AreaOutcome::Skipped);
    };
    let unit = layout.unit();
    let arch = first.arch();
    ctx.log.verbose(format_args!("Checking {unit} ({arch})..."));

    let tsconfig = tsconfig.ok_or_else(|| BuildError::MissingConfig {
        package: unit.to_string(),
        file: PACKAGE_CONFIG.to_string(),
    })?;

    ctx.log.info(format_args!("Compiling files from {unit} ({arch})..."));
    let transform = tsconfig.needs_transform();
    for file in files {
        let output = compile_file(ctx, file, tsconfig, transform)?;
        sink.add_javascript(file, output)?;
    }
    Ok(AreaOutcome::Compiled { files: files.len() })
}

fn compile_file(
    ctx: &BuildContext<'_>,
    file: &CandidateFile,
    tsconfig: &TsConfig,
    transform: bool,
) -> BuildResult<CompiledOutput> {
    ctx.log
        .verbose(format_args!("compiling {}", file.display_path()));
    let transpiled = ctx.toolchain.transpile(file, tsconfig)?;

    let data = if transform {
        ctx.toolchain.transform(&transpiled.output_text)?
    } else {
        transpiled.output_text
    };

    let source_map = transpiled
        .source_map_text
        .as_deref()
        .map(|text| retarget_source_map(text, file.display_path()))
        .transpose()?;

    Ok(CompiledOutput {
        source_path: file.path_in_package().to_string(),
        path: js_path(file.path_in_package()),
        data,
        source_map,
        hash: file.source_hash().to_string(),
    })
}

/// `path` with its extension replaced by `.js`.
fn js_path(path: &str) -> String {
    let (dir, name) = match path.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, path),
    };
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    match dir {
        Some(dir) => format!("{dir}/{stem}.js"),
        None => format!("{stem}.js"),
    }
}

/// Parses a source map and points its `sources` at the original file.
fn retarget_source_map(text: &str, display_path: &str) -> BuildResult<Value> {
    let mut map: Value =
        serde_json::from_str(text).map_err(|e| BuildError::invalid_output("transpiler", e))?;
    let Some(object) = map.as_object_mut() else {
        return Err(BuildError::invalid_output(
            "transpiler",
            "source map is not a JSON object",
        ));
    };
    object.insert("sources".to_string(), Value::from(vec![display_path]));
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_path_swaps_extension() {
        assert_eq!(js_path("server/main.ts"), "server/main.js");
        assert_eq!(js_path("server/api/v1.routes.ts"), "server/api/v1.routes.js");
        assert_eq!(js_path("server/LICENSE"), "server/LICENSE.js");
        assert_eq!(js_path("server/.hidden"), "server/.hidden.js");
        assert_eq!(js_path("main.ts"), "main.js");
    }

    #[test]
    fn source_map_sources_replaced() {
        let map = retarget_source_map(
            r#"{"version":3,"sources":["main.ts"],"mappings":"AAAA"}"#,
            "packages/w/server/main.ts",
        )
        .unwrap();
        assert_eq!(map["sources"], serde_json::json!(["packages/w/server/main.ts"]));
        assert_eq!(map["mappings"], "AAAA");
    }

    #[test]
    fn source_map_must_be_object() {
        assert!(matches!(
            retarget_source_map("[1, 2]", "x"),
            Err(BuildError::InvalidToolOutput { .. })
        ));
        assert!(matches!(
            retarget_source_map("not json", "x"),
            Err(BuildError::InvalidToolOutput { .. })
        ));
    }
}
