//! Raw build configuration for one deployable function.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::runtime::Runtime;

/// User-supplied build properties.
///
/// Every optional field keeps `None` until resolution; defaults are applied
/// by [`crate::resolve::plan`] only when a field is absent, never by mutating
/// this value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBuildProps {
  /// Path to the entry file (JavaScript or TypeScript).
  pub entry: PathBuf,

  /// Path to the bundler config file. Unused when the build is skipped.
  #[serde(default)]
  pub config: PathBuf,

  /// Exported handler name in the entry file (default `handler`).
  #[serde(default, rename = "handler", skip_serializing_if = "Option::is_none")]
  pub handler_name: Option<String>,

  /// Runtime; only the Node.js family is supported (default `nodejs14.x`).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub runtime: Option<Runtime>,

  /// Build directory (default `.build` next to the entry file).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub build_dir: Option<PathBuf>,

  /// Place output under a per-entry hashed subdirectory (default `true`).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ensure_unique_build_path: Option<bool>,

  /// Trust a previously produced artifact instead of bundling (default `false`).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub skip_build: Option<bool>,
}

impl FunctionBuildProps {
  pub fn new(entry: impl Into<PathBuf>, config: impl Into<PathBuf>) -> Self {
    Self {
      entry: entry.into(),
      config: config.into(),
      ..Default::default()
    }
  }

  pub fn with_handler_name(mut self, handler_name: &str) -> Self {
    self.handler_name = Some(handler_name.to_string());
    self
  }

  pub fn with_runtime(mut self, runtime: Runtime) -> Self {
    self.runtime = Some(runtime);
    self
  }

  pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
    self.build_dir = Some(build_dir.into());
    self
  }

  pub fn with_ensure_unique_build_path(mut self, unique: bool) -> Self {
    self.ensure_unique_build_path = Some(unique);
    self
  }

  pub fn with_skip_build(mut self, skip: bool) -> Self {
    self.skip_build = Some(skip);
    self
  }
}
