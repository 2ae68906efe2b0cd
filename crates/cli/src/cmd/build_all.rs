//! Implementation of the `fnpack build-all` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use fnpack_lib::bundler::{NodeModulesLocator, WebpackExecutor};
use fnpack_lib::function::DeployableFunction;
use fnpack_lib::manifest::{BuildAllConfig, Manifest, build_all};
use fnpack_lib::props::FunctionBuildProps;

use crate::cmd::build::print_function;
use crate::output::{OutputFormat, format_duration, print_error, print_json, print_stat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeOutput<'a> {
  id: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  function: Option<&'a DeployableFunction>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
}

/// Build every function in a manifest concurrently.
///
/// Exits with an error if any function failed; the others are still built.
pub fn cmd_build_all(manifest_path: &Path, parallelism: Option<usize>, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let manifest = Manifest::load(manifest_path).context("Failed to load manifest")?;
  debug!(path = %manifest_path.display(), functions = manifest.functions.len(), "loaded manifest");

  let mut config = BuildAllConfig::default();
  if let Some(parallelism) = parallelism {
    config.parallelism = parallelism;
  }

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(build_all(&manifest, &config, |props: &FunctionBuildProps| {
    WebpackExecutor::new(&NodeModulesLocator::for_entry(&props.entry))
  }));

  if output.is_json() {
    let outcomes: Vec<OutcomeOutput<'_>> = result
      .outcomes
      .iter()
      .map(|o| OutcomeOutput {
        id: &o.id,
        function: o.result.as_ref().ok(),
        error: o.result.as_ref().err().map(|e| e.to_string()),
      })
      .collect();
    print_json(&outcomes)?;
  } else {
    for (id, function) in result.succeeded() {
      print_function(id, function);
    }
    for (id, err) in result.failed() {
      print_error(&format!("{}: {}", id, err));
    }
    println!();
    print_stat("Functions", &manifest.functions.len().to_string());
    print_stat("Failed", &result.failed().count().to_string());
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  if !result.is_success() {
    let failed = manifest.functions.len() - result.succeeded().count();
    bail!("{} of {} function(s) failed to build", failed, manifest.functions.len());
  }

  Ok(())
}
