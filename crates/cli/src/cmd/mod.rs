mod build;
mod build_all;
mod info;
mod plan;

use std::path::PathBuf;

use clap::Args;

use fnpack_lib::manifest::FunctionEntry;
use fnpack_lib::props::FunctionBuildProps;
use fnpack_lib::resolve::output_basename;
use fnpack_lib::runtime::Runtime;

pub use build::cmd_build;
pub use build_all::cmd_build_all;
pub use info::cmd_info;
pub use plan::cmd_plan;

/// Options describing one function.
#[derive(Debug, Args)]
pub struct FunctionArgs {
  /// Entry file (.js or .ts)
  #[arg(long)]
  pub entry: PathBuf,

  /// webpack config file (not needed with --skip-build)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Exported handler name [default: handler]
  #[arg(long = "handler")]
  pub handler_name: Option<String>,

  /// Runtime identifier, e.g. nodejs18.x [default: nodejs14.x]
  #[arg(long)]
  pub runtime: Option<Runtime>,

  /// Build directory [default: .build next to the entry]
  #[arg(long)]
  pub build_dir: Option<PathBuf>,

  /// Nest output under a hash of the entry path [default: true]
  #[arg(long)]
  pub ensure_unique_build_path: Option<bool>,

  /// Reuse the previously built artifact instead of bundling
  #[arg(long, num_args = 0..=1, default_missing_value = "true")]
  pub skip_build: Option<bool>,

  /// Describe a singleton function with this UUID
  #[arg(long)]
  pub uuid: Option<String>,

  /// Purpose of the singleton function
  #[arg(long, requires = "uuid")]
  pub lambda_purpose: Option<String>,
}

impl FunctionArgs {
  pub fn props(&self) -> FunctionBuildProps {
    FunctionBuildProps {
      entry: self.entry.clone(),
      config: self.config.clone().unwrap_or_default(),
      handler_name: self.handler_name.clone(),
      runtime: self.runtime.clone(),
      build_dir: self.build_dir.clone(),
      ensure_unique_build_path: self.ensure_unique_build_path,
      skip_build: self.skip_build,
    }
  }

  pub fn entry(&self) -> FunctionEntry {
    FunctionEntry {
      id: output_basename(&self.entry),
      uuid: self.uuid.clone(),
      lambda_purpose: self.lambda_purpose.clone(),
      props: self.props(),
    }
  }
}
