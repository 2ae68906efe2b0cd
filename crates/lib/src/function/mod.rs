//! Deployable function descriptors.
//!
//! Two thin adapters over [`resolve`]: a plain function and a singleton
//! (reused) function. Both resolve the build the same way and only differ in
//! the descriptor handed to the packaging layer, which uploads `code_asset`
//! and wires `handler` into the runtime.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bundler::{BundlerError, Executor};
use crate::props::FunctionBuildProps;
use crate::resolve::{ResolveError, ResolvedBuild, resolve};
use crate::runtime::Runtime;

/// A plain function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpec {
  pub runtime: Runtime,
  /// Directory packaged as the function's code asset.
  pub code_asset: PathBuf,
  /// `<output basename>.<handler name>`
  pub handler: String,
}

impl From<&ResolvedBuild> for FunctionSpec {
  fn from(build: &ResolvedBuild) -> Self {
    Self {
      runtime: build.runtime.clone(),
      code_asset: build.handler_directory.clone(),
      handler: build.handler(),
    }
  }
}

/// A function deployed at most once per stack, keyed by `uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingletonFunctionSpec {
  pub uuid: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lambda_purpose: Option<String>,
  #[serde(flatten)]
  pub function: FunctionSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeployableFunction {
  Function(FunctionSpec),
  Singleton(SingletonFunctionSpec),
}

impl DeployableFunction {
  pub fn function(&self) -> &FunctionSpec {
    match self {
      Self::Function(spec) => spec,
      Self::Singleton(spec) => &spec.function,
    }
  }
}

/// Resolve `props` into a plain function descriptor.
pub async fn webpack_function<E, F>(props: &FunctionBuildProps, executor: F) -> Result<FunctionSpec, ResolveError>
where
  E: Executor,
  F: FnOnce() -> Result<E, BundlerError>,
{
  let build = resolve(props, executor).await?;
  Ok(FunctionSpec::from(&build))
}

/// Resolve `props` into a singleton function descriptor.
pub async fn webpack_singleton_function<E, F>(
  props: &FunctionBuildProps,
  uuid: &str,
  lambda_purpose: Option<&str>,
  executor: F,
) -> Result<SingletonFunctionSpec, ResolveError>
where
  E: Executor,
  F: FnOnce() -> Result<E, BundlerError>,
{
  let build = resolve(props, executor).await?;
  Ok(SingletonFunctionSpec {
    uuid: uuid.to_string(),
    lambda_purpose: lambda_purpose.map(str::to_string),
    function: FunctionSpec::from(&build),
  })
}
