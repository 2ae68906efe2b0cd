use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute paths for a single bundler run.
///
/// `output`'s parent directory does not have to exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
  pub entry: PathBuf,
  pub output: PathBuf,
  pub config: PathBuf,
}

/// Diagnostics of a bundler process that exited unsuccessfully.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFailure {
  pub pid: u32,
  /// Signal that terminated the process, if any (Unix only).
  pub signal: Option<i32>,
  /// Exit code; `None` when killed by a signal.
  pub status: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl fmt::Display for BuildFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
    write!(f, "{}", json)
  }
}

/// Errors that can occur while locating or running the bundler.
#[derive(Debug, Error)]
pub enum BundlerError {
  /// The bundler executable could not be found.
  #[error("It looks like {tool} is not installed. Please install webpack and webpack-cli with yarn or npm.")]
  NotInstalled { tool: String, searched: Vec<PathBuf> },

  /// The process could not be started or waited on.
  #[error("failed to launch bundler {}: {source}", .bin.display())]
  Launch {
    bin: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The bundler exited with a non-zero status.
  #[error("{0}")]
  BuildFailed(BuildFailure),
}
