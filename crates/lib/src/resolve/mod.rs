//! Function build resolution.
//!
//! Turns raw [`FunctionBuildProps`] into a validated [`BuildPlan`], then
//! either runs the bundler once or, when the build is skipped, checks that
//! the artifact from an earlier run is still there.
//!
//! # Output layout
//!
//! ```text
//! <build_dir>/
//! └── <sha256(entry path)>/      # only with ensure_unique_build_path
//!     └── <entry stem>.js
//! ```
//!
//! The hashed directory depends on nothing but the entry path string, so
//! functions with different entries never share a directory and the same
//! entry always lands in the same place.

mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bundler::{BundlerError, Executor, NodeModulesLocator, WebpackExecutor};
use crate::consts::{BUNDLER_OUTPUT_EXT, DEFAULT_BUILD_DIR_NAME, DEFAULT_HANDLER_NAME, ENTRY_EXTENSIONS};
use crate::props::FunctionBuildProps;
use crate::util::hash::hash_path;

pub use types::*;

/// Validate `props` and derive every path, without building.
///
/// Checks run in this order, each with its own error:
/// 1. runtime family (only when a runtime is given)
/// 2. entry extension
/// 3. entry and config existence (skipped when `skip_build` is set)
pub fn plan(props: &FunctionBuildProps) -> Result<BuildPlan, ResolveError> {
  let skip_build = props.skip_build.unwrap_or(false);

  if let Some(runtime) = props.runtime.as_ref().filter(|r| !r.is_supported()) {
    return Err(ResolveError::UnsupportedRuntime {
      runtime: runtime.clone(),
      family: runtime.family(),
    });
  }

  if !is_supported_entry(&props.entry) {
    return Err(ResolveError::UnsupportedEntryType(props.entry.clone()));
  }

  if !skip_build {
    if !props.entry.exists() {
      return Err(ResolveError::EntryNotFound(props.entry.clone()));
    }
    if !props.config.exists() {
      return Err(ResolveError::ConfigNotFound(props.config.clone()));
    }
  }

  let handler_name = props
    .handler_name
    .clone()
    .unwrap_or_else(|| DEFAULT_HANDLER_NAME.to_string());
  let runtime = props.runtime.clone().unwrap_or_default();
  let build_dir = props
    .build_dir
    .clone()
    .unwrap_or_else(|| default_build_dir(&props.entry));

  let handler_directory = if props.ensure_unique_build_path.unwrap_or(true) {
    unique_build_path(&build_dir, &props.entry)
  } else {
    build_dir.clone()
  };

  let output_basename = output_basename(&props.entry);
  let output_file = handler_directory.join(format!("{}.{}", output_basename, BUNDLER_OUTPUT_EXT));

  Ok(BuildPlan {
    runtime,
    handler_name,
    entry: props.entry.clone(),
    config: props.config.clone(),
    build_dir,
    handler_directory,
    output_basename,
    output_file,
    skip_build,
  })
}

/// Resolve a function build, running the bundler when needed.
///
/// `executor` is only called when a build actually runs, so a missing bundler
/// does not matter for skipped builds. Bundler errors are returned unchanged.
pub async fn resolve<E, F>(props: &FunctionBuildProps, executor: F) -> Result<ResolvedBuild, ResolveError>
where
  E: Executor,
  F: FnOnce() -> Result<E, BundlerError>,
{
  let plan = plan(props)?;

  if plan.skip_build {
    if !plan.output_file.exists() {
      return Err(ResolveError::BuiltArtifactMissing(plan.output_file));
    }
    info!(artifact = %plan.output_file.display(), "skipping build, reusing artifact");
  } else {
    let request = plan.build_request()?;
    debug!(?request, "resolved build request");
    let executor = executor()?;
    executor.build(&request).await?;
  }

  Ok(plan.resolved())
}

/// [`resolve`] with webpack located from `node_modules/.bin`.
pub async fn resolve_with_webpack(props: &FunctionBuildProps) -> Result<ResolvedBuild, ResolveError> {
  resolve(props, || WebpackExecutor::new(&NodeModulesLocator::for_entry(&props.entry))).await
}

/// `build_dir/<sha256 hex of the entry path>`
pub fn unique_build_path(build_dir: &Path, entry: &Path) -> PathBuf {
  build_dir.join(hash_path(entry))
}

/// `.build` in the entry file's directory.
pub fn default_build_dir(entry: &Path) -> PathBuf {
  entry.parent().unwrap_or_else(|| Path::new("")).join(DEFAULT_BUILD_DIR_NAME)
}

/// Entry file name without its extension.
pub fn output_basename(entry: &Path) -> String {
  entry
    .file_stem()
    .map(|s| s.to_string_lossy().to_string())
    .unwrap_or_default()
}

/// Matched on the path string, so a bare `.ts` file name counts too.
fn is_supported_entry(entry: &Path) -> bool {
  let entry = entry.to_string_lossy();
  ENTRY_EXTENSIONS
    .iter()
    .any(|ext| entry.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}
