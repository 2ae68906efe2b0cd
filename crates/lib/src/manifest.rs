//! Multi-function manifests.
//!
//! A manifest lists every function of a project. [`build_all`] resolves them
//! concurrently: each function is one atomic resolve with its own bundler
//! process, and different entries never write to the same directory, so no
//! locking is needed between them.
//!
//! ```json
//! {
//!   "functions": [
//!     { "id": "api", "entry": "src/api.ts", "config": "webpack.config.js" },
//!     { "id": "cron", "uuid": "2b9c...", "lambdaPurpose": "cleanup",
//!       "entry": "src/cron.ts", "config": "webpack.config.js", "skipBuild": true }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::bundler::{BundlerError, Executor};
use crate::function::{DeployableFunction, webpack_function, webpack_singleton_function};
use crate::props::FunctionBuildProps;
use crate::resolve::ResolveError;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid manifest: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("duplicate function id: {0}")]
  DuplicateId(String),

  #[error("function id must not be empty")]
  EmptyId,
}

/// One function of a manifest.
///
/// Presence of `uuid` selects a singleton function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub uuid: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lambda_purpose: Option<String>,
  #[serde(flatten)]
  pub props: FunctionBuildProps,
}

impl FunctionEntry {
  /// Resolve through the plain or singleton adapter.
  pub async fn resolve<E, F>(&self, executor: F) -> Result<DeployableFunction, ResolveError>
  where
    E: Executor,
    F: FnOnce() -> Result<E, BundlerError>,
  {
    match &self.uuid {
      Some(uuid) => webpack_singleton_function(&self.props, uuid, self.lambda_purpose.as_deref(), executor)
        .await
        .map(DeployableFunction::Singleton),
      None => webpack_function(&self.props, executor)
        .await
        .map(DeployableFunction::Function),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub functions: Vec<FunctionEntry>,
}

impl Manifest {
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }

  pub fn from_json(json: &str) -> Result<Self, ManifestError> {
    let manifest: Manifest = serde_json::from_str(json)?;
    manifest.validate()?;
    Ok(manifest)
  }

  fn validate(&self) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for function in &self.functions {
      if function.id.is_empty() {
        return Err(ManifestError::EmptyId);
      }
      if !seen.insert(function.id.as_str()) {
        return Err(ManifestError::DuplicateId(function.id.clone()));
      }
    }
    Ok(())
  }
}

/// Configuration for [`build_all`].
#[derive(Debug, Clone)]
pub struct BuildAllConfig {
  /// Maximum number of functions resolved at once.
  pub parallelism: usize,
}

impl Default for BuildAllConfig {
  fn default() -> Self {
    Self {
      parallelism: num_cpus(),
    }
  }
}

/// Result of resolving one manifest function.
#[derive(Debug)]
pub struct FunctionOutcome {
  pub id: String,
  pub result: Result<DeployableFunction, ResolveError>,
}

/// Results of [`build_all`], in manifest order.
#[derive(Debug, Default)]
pub struct BuildAllResult {
  pub outcomes: Vec<FunctionOutcome>,
  /// Number of functions in the manifest.
  pub expected: usize,
}

impl BuildAllResult {
  /// Returns true if every function resolved.
  pub fn is_success(&self) -> bool {
    self.outcomes.len() == self.expected && self.outcomes.iter().all(|o| o.result.is_ok())
  }

  pub fn succeeded(&self) -> impl Iterator<Item = (&str, &DeployableFunction)> {
    self
      .outcomes
      .iter()
      .filter_map(|o| o.result.as_ref().ok().map(|f| (o.id.as_str(), f)))
  }

  pub fn failed(&self) -> impl Iterator<Item = (&str, &ResolveError)> {
    self
      .outcomes
      .iter()
      .filter_map(|o| o.result.as_ref().err().map(|e| (o.id.as_str(), e)))
  }
}

/// Resolve every function of `manifest`, at most `config.parallelism` at once.
///
/// `executor` builds an executor for a function's props; it is only called for
/// functions that actually need a build. A failing function does not stop the
/// others.
pub async fn build_all<E, F>(manifest: &Manifest, config: &BuildAllConfig, executor: F) -> BuildAllResult
where
  E: Executor + Send + 'static,
  F: Fn(&FunctionBuildProps) -> Result<E, BundlerError> + Send + Sync + 'static,
{
  info!(
    functions = manifest.functions.len(),
    parallelism = config.parallelism,
    "building functions"
  );

  let semaphore = Arc::new(Semaphore::new(config.parallelism.max(1)));
  let executor = Arc::new(executor);
  let mut join_set = JoinSet::new();

  for (index, entry) in manifest.functions.iter().cloned().enumerate() {
    let semaphore = semaphore.clone();
    let executor = executor.clone();

    join_set.spawn(async move {
      let _permit = semaphore.acquire().await.ok();
      let result = entry.resolve(|| (executor.as_ref())(&entry.props)).await;
      (index, FunctionOutcome { id: entry.id, result })
    });
  }

  let mut indexed = Vec::with_capacity(manifest.functions.len());
  while let Some(join_result) = join_set.join_next().await {
    match join_result {
      Ok((index, outcome)) => {
        if let Err(e) = &outcome.result {
          warn!(id = %outcome.id, error = %e, "function build failed");
        }
        indexed.push((index, outcome));
      }
      Err(e) => {
        error!(error = %e, "function build task panicked");
      }
    }
  }
  indexed.sort_by_key(|(index, _)| *index);

  BuildAllResult {
    outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
    expected: manifest.functions.len(),
  }
}

/// Get the number of CPUs for default parallelism.
fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}
