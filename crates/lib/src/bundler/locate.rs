//! Bundler executable discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bundler::BundlerError;
use crate::consts::{BUNDLER_ENV_VAR, BUNDLER_PACKAGE};

/// Finds the bundler executable.
pub trait ToolLocator {
  fn locate(&self) -> Result<PathBuf, BundlerError>;
}

/// A bundler at a known path.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl ToolLocator for FixedLocator {
  fn locate(&self) -> Result<PathBuf, BundlerError> {
    if self.0.is_file() {
      Ok(self.0.clone())
    } else {
      Err(BundlerError::NotInstalled {
        tool: BUNDLER_PACKAGE.to_string(),
        searched: vec![self.0.clone()],
      })
    }
  }
}

/// Looks for `node_modules/.bin/<tool>` in each search root and its ancestors,
/// the way a package-local binary is resolved.
///
/// `FNPACK_BUNDLER`, when set, replaces the search entirely.
#[derive(Debug, Clone)]
pub struct NodeModulesLocator {
  tool: String,
  search_roots: Vec<PathBuf>,
}

impl NodeModulesLocator {
  pub fn new(tool: &str, search_roots: Vec<PathBuf>) -> Self {
    Self {
      tool: tool.to_string(),
      search_roots,
    }
  }

  /// Search from the entry file's directory, then from the working directory.
  pub fn for_entry(entry: &Path) -> Self {
    let mut roots = Vec::new();
    if let Some(dir) = std::path::absolute(entry).ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
      roots.push(dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
      roots.push(cwd);
    }
    Self::new(BUNDLER_PACKAGE, roots)
  }

  /// Every path that would be checked, in order.
  pub fn candidates(&self) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for root in &self.search_roots {
      for dir in root.ancestors() {
        for name in executable_names(&self.tool) {
          let candidate = dir.join("node_modules").join(".bin").join(name);
          if !candidates.contains(&candidate) {
            candidates.push(candidate);
          }
        }
      }
    }
    candidates
  }
}

impl ToolLocator for NodeModulesLocator {
  fn locate(&self) -> Result<PathBuf, BundlerError> {
    if let Some(path) = std::env::var(BUNDLER_ENV_VAR).ok().filter(|p| !p.is_empty()) {
      debug!(path = %path, "using bundler from {}", BUNDLER_ENV_VAR);
      return FixedLocator(PathBuf::from(path)).locate();
    }

    let candidates = self.candidates();
    match candidates.iter().find(|c| c.is_file()) {
      Some(found) => {
        debug!(path = %found.display(), "found bundler");
        Ok(found.clone())
      }
      None => Err(BundlerError::NotInstalled {
        tool: self.tool.clone(),
        searched: candidates,
      }),
    }
  }
}

#[cfg(windows)]
fn executable_names(tool: &str) -> Vec<String> {
  vec![format!("{}.cmd", tool), tool.to_string()]
}

#[cfg(not(windows))]
fn executable_names(tool: &str) -> Vec<String> {
  vec![tool.to_string()]
}
