use anyhow::Result;
use serde::Serialize;

use fnpack_lib::bundler::{NodeModulesLocator, ToolLocator};
use fnpack_lib::consts::BUNDLER_PACKAGE;
use fnpack_lib::runtime::Runtime;

use crate::output::{OutputFormat, print_json, print_stat, print_warning};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoOutput {
  version: &'static str,
  default_runtime: Runtime,
  bundler: Option<String>,
}

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let bundler = NodeModulesLocator::new(BUNDLER_PACKAGE, vec![cwd]).locate();

  if output.is_json() {
    return print_json(&InfoOutput {
      version: env!("CARGO_PKG_VERSION"),
      default_runtime: Runtime::default(),
      bundler: bundler.ok().map(|p| p.display().to_string()),
    });
  }

  println!("fnpack {}", env!("CARGO_PKG_VERSION"));
  print_stat("Default runtime", Runtime::default().name());
  match bundler {
    Ok(path) => print_stat("Bundler", &path.display().to_string()),
    Err(e) => print_warning(&e.to_string()),
  }

  Ok(())
}
