//! webpack CLI executor.
//!
//! Builds a fixed argument vector from a [`BuildRequest`] and runs the
//! bundler once. Everything not set on the command line comes from the
//! user's config file, which webpack merges with these flags.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::bundler::{BuildFailure, BuildRequest, BundlerError, Executor, ToolLocator};

/// Module format the artifact is emitted in, loadable as a plain module.
const OUTPUT_LIBRARY_TYPE: &str = "commonjs";

#[derive(Debug, Clone)]
pub struct WebpackExecutor {
  bin: PathBuf,
}

impl WebpackExecutor {
  /// Locate the bundler now; fails with [`BundlerError::NotInstalled`]
  /// before any build is attempted.
  pub fn new(locator: &impl ToolLocator) -> Result<Self, BundlerError> {
    Ok(Self::with_bin(locator.locate()?))
  }

  /// Use `bin` as-is without checking that it exists.
  pub fn with_bin(bin: impl Into<PathBuf>) -> Self {
    Self { bin: bin.into() }
  }

  pub fn bin(&self) -> &Path {
    &self.bin
  }

  /// Argument vector for one build.
  pub fn args(request: &BuildRequest) -> Vec<OsString> {
    let output_dir = request.output.parent().unwrap_or_else(|| Path::new("."));
    let output_filename = request.output.file_name().unwrap_or_default();

    vec![
      "--config".into(),
      request.config.clone().into_os_string(),
      "--output-library-type".into(),
      OUTPUT_LIBRARY_TYPE.into(),
      "--entry".into(),
      request.entry.clone().into_os_string(),
      "--output-path".into(),
      output_dir.as_os_str().to_os_string(),
      "--output-filename".into(),
      output_filename.to_os_string(),
    ]
  }
}

impl Executor for WebpackExecutor {
  async fn build(&self, request: &BuildRequest) -> Result<(), BundlerError> {
    let args = Self::args(request);
    info!(entry = %request.entry.display(), output = %request.output.display(), "bundling");
    debug!(bin = %self.bin.display(), args = ?args, "spawning bundler");

    let launch_err = |source| BundlerError::Launch {
      bin: self.bin.clone(),
      source,
    };

    let child = Command::new(&self.bin)
      .args(&args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(launch_err)?;
    let pid = child.id().unwrap_or_default();

    let output = child.wait_with_output().await.map_err(launch_err)?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "bundler stdout");
    }
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "bundler stderr");
    }

    if !output.status.success() {
      return Err(BundlerError::BuildFailed(BuildFailure {
        pid,
        signal: exit_signal(&output.status),
        status: output.status.code(),
        stdout,
        stderr,
      }));
    }

    info!(pid, output = %request.output.display(), "bundler finished");
    Ok(())
  }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
  use std::os::unix::process::ExitStatusExt;
  status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
  None
}
