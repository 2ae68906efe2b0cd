//! Implementation of the `fnpack build` command.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use fnpack_lib::bundler::{NodeModulesLocator, WebpackExecutor};
use fnpack_lib::function::DeployableFunction;

use crate::cmd::FunctionArgs;
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

/// Bundle one function and print its deployable descriptor.
pub fn cmd_build(args: &FunctionArgs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let entry = args.entry();
  debug!(id = %entry.id, entry = %entry.props.entry.display(), "building function");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let function = rt
    .block_on(entry.resolve(|| WebpackExecutor::new(&NodeModulesLocator::for_entry(&entry.props.entry))))
    .with_context(|| format!("Failed to build {}", entry.props.entry.display()))?;

  if output.is_json() {
    print_json(&function)?;
  } else {
    print_function(&entry.id, &function);
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}

pub(crate) fn print_function(id: &str, function: &DeployableFunction) {
  let spec = function.function();
  print_success(&format!("Built {}", id));
  print_stat("Runtime", spec.runtime.name());
  print_stat("Handler", &spec.handler);
  print_stat("Code asset", &spec.code_asset.display().to_string());
  if let DeployableFunction::Singleton(singleton) = function {
    print_stat("UUID", &singleton.uuid);
    if let Some(purpose) = &singleton.lambda_purpose {
      print_stat("Purpose", purpose);
    }
  }
}
