//! Shared helpers for library integration tests.

use std::future::Future;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use fnpack_lib::consts::BUNDLER_ENV_VAR;
use tempfile::TempDir;

/// Run `test` to completion with `FNPACK_BUNDLER` unset, so the bundler is
/// looked up in the project's `node_modules/.bin`.
pub fn without_bundler_override<T: Future>(test: T) -> T::Output {
  temp_env::with_var(BUNDLER_ENV_VAR, None::<&str>, || {
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .unwrap()
      .block_on(test)
  })
}

/// A project with `src/handler.ts`, `webpack.config.js`, and a fake
/// `node_modules/.bin/webpack-cli`.
pub struct Project {
  pub temp: TempDir,
}

impl Project {
  pub fn new() -> Self {
    let project = Self {
      temp: TempDir::new().unwrap(),
    };
    project.write("src/handler.ts", "export const handler = async () => ({ statusCode: 200 });");
    project.write("webpack.config.js", "module.exports = { mode: 'production' };");
    project
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  pub fn write(&self, relative: &str, content: &str) -> PathBuf {
    let path = self.root().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Install a bundler script at `node_modules/.bin/webpack-cli`.
  pub fn install_bundler(&self, script: &str) -> PathBuf {
    let path = self.write("node_modules/.bin/webpack-cli", &format!("#!/bin/sh\n{}\n", script));
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
  }

  /// Bundler that writes the requested output file and logs its arguments.
  pub fn install_working_bundler(&self) -> PathBuf {
    let log = self.root().join("bundler-args.txt");
    self.install_bundler(&format!(
      r#"printf '%s\n' "$@" >> '{}'
while [ $# -gt 0 ]; do
  case "$1" in
    --output-path) dir="$2"; shift ;;
    --output-filename) file="$2"; shift ;;
  esac
  shift
done
mkdir -p "$dir"
echo 'exports.handler = async () => ({{ statusCode: 200 }});' > "$dir/$file""#,
      log.display()
    ))
  }

  /// Every argument the bundler was invoked with, across all runs.
  pub fn bundler_args(&self) -> Vec<String> {
    std::fs::read_to_string(self.root().join("bundler-args.txt"))
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }
}
