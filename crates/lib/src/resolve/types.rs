use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bundler::{BuildRequest, BundlerError};
use crate::runtime::{Runtime, RuntimeFamily};

/// Errors that can occur while resolving a function build.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("Only `NODEJS` runtimes are supported, got {runtime} ({family})")]
  UnsupportedRuntime { runtime: Runtime, family: RuntimeFamily },

  #[error("Only JavaScript or TypeScript entry files are supported: {}", .0.display())]
  UnsupportedEntryType(PathBuf),

  #[error("Cannot find entry file at {}", .0.display())]
  EntryNotFound(PathBuf),

  #[error("Cannot find webpack config file at {}", .0.display())]
  ConfigNotFound(PathBuf),

  #[error("Cannot find built file at {}", .0.display())]
  BuiltArtifactMissing(PathBuf),

  /// Bundler failures pass through unchanged.
  #[error(transparent)]
  Bundler(#[from] BundlerError),

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Fully defaulted, validated build plan for one function.
///
/// Computing a plan only reads the filesystem; nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
  pub runtime: Runtime,
  pub handler_name: String,
  pub entry: PathBuf,
  pub config: PathBuf,
  pub build_dir: PathBuf,
  /// Directory the bundled file is written to.
  pub handler_directory: PathBuf,
  pub output_basename: String,
  /// `handler_directory/<output_basename>.js`
  pub output_file: PathBuf,
  pub skip_build: bool,
}

impl BuildPlan {
  /// Absolute paths for the bundler.
  pub fn build_request(&self) -> io::Result<BuildRequest> {
    Ok(BuildRequest {
      entry: absolute(&self.entry)?,
      output: absolute(&self.output_file)?,
      config: absolute(&self.config)?,
    })
  }

  pub fn resolved(&self) -> ResolvedBuild {
    ResolvedBuild {
      runtime: self.runtime.clone(),
      handler_directory: self.handler_directory.clone(),
      output_basename: self.output_basename.clone(),
      handler_name: self.handler_name.clone(),
    }
  }
}

/// What the packaging layer needs to deploy a bundled function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBuild {
  pub runtime: Runtime,
  pub handler_directory: PathBuf,
  pub output_basename: String,
  pub handler_name: String,
}

impl ResolvedBuild {
  /// Fully qualified entry point, `<output_basename>.<handler_name>`.
  pub fn handler(&self) -> String {
    format!("{}.{}", self.output_basename, self.handler_name)
  }
}

/// Lexically absolute path with `.` and `..` folded; the target need not
/// exist and symlinks are not followed.
fn absolute(path: &Path) -> io::Result<PathBuf> {
  let mut normalized = PathBuf::new();
  for component in std::path::absolute(path)?.components() {
    match component {
      Component::CurDir => {}
      // `pop` stops at the root.
      Component::ParentDir => {
        normalized.pop();
      }
      other => normalized.push(other),
    }
  }
  Ok(dunce::simplified(&normalized).to_path_buf())
}
