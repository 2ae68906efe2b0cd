//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory.
///
/// Each test gets its own temporary directory holding sources, config, and an
/// optional fake bundler under `node_modules/.bin`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A project with `src/handler.ts` and `webpack.config.js`.
  pub fn project() -> Self {
    let env = Self::empty();
    env.write_file("src/handler.ts", "export const handler = async () => ({ statusCode: 200 });");
    env.write_file("webpack.config.js", "module.exports = { mode: 'production' };");
    env
  }

  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Canonical project root, matching what the child sees as its cwd.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Install an executable script at `node_modules/.bin/webpack-cli`.
  #[cfg(unix)]
  pub fn install_bundler(&self, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.write_file("node_modules/.bin/webpack-cli", &format!("#!/bin/sh\n{}\n", script));
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
  }

  /// Bundler that writes the requested file and appends its arguments to
  /// `bundler-args.txt`.
  #[cfg(unix)]
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

  pub fn bundler_args(&self) -> Vec<String> {
    std::fs::read_to_string(self.root().join("bundler-args.txt"))
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
    self.root().join(relative).exists()
  }

  /// Get a pre-configured Command for the fnpack binary, running in the
  /// project root with no bundler override.
  pub fn fnpack_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("fnpack");
    cmd.current_dir(self.root());
    cmd.env_remove("FNPACK_BUNDLER");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
