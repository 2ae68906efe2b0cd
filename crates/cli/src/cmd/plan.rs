//! Implementation of the `fnpack plan` command.
//!
//! Shows where a function would be built and how the bundler would be
//! invoked, without running anything.

use anyhow::{Context, Result};
use serde::Serialize;

use fnpack_lib::bundler::WebpackExecutor;
use fnpack_lib::resolve::{BuildPlan, plan};

use crate::cmd::FunctionArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols, truncate_hash};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanOutput<'a> {
  #[serde(flatten)]
  plan: &'a BuildPlan,
  handler: String,
  /// Empty when the build is skipped.
  bundler_args: Vec<String>,
}

pub fn cmd_plan(args: &FunctionArgs, output: OutputFormat) -> Result<()> {
  let plan = plan(&args.props()).context("Invalid function configuration")?;

  let bundler_args = if plan.skip_build {
    Vec::new()
  } else {
    let request = plan.build_request().context("Failed to resolve absolute paths")?;
    WebpackExecutor::args(&request)
      .into_iter()
      .map(|a| a.to_string_lossy().to_string())
      .collect()
  };

  if output.is_json() {
    return print_json(&PlanOutput {
      plan: &plan,
      handler: plan.resolved().handler(),
      bundler_args,
    });
  }

  print_info(&format!("{} {} {}", plan.entry.display(), symbols::ARROW, plan.output_file.display()));
  print_stat("Runtime", plan.runtime.name());
  print_stat("Handler", &plan.resolved().handler());
  print_stat("Build dir", &plan.build_dir.display().to_string());
  if plan.handler_directory != plan.build_dir {
    let hash = plan
      .handler_directory
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();
    print_stat("Build hash", truncate_hash(&hash));
  }
  if plan.skip_build {
    print_stat("Bundler", "skipped (reusing existing artifact)");
  } else {
    print_stat("Bundler args", &bundler_args.join(" "));
  }

  Ok(())
}
