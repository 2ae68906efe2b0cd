//! External bundler invocation.
//!
//! The bundler is an opaque CLI. This module finds its executable
//! ([`locate`]), turns a [`BuildRequest`] into one blocking-until-exit
//! subprocess ([`webpack`]), and maps the outcome onto [`BundlerError`].
//!
//! # Submodules
//!
//! - [`locate`] - Tool locators (`node_modules/.bin` walk, fixed path)
//! - [`webpack`] - The webpack CLI executor

pub mod locate;
pub mod webpack;
mod types;

use std::future::Future;

pub use locate::{FixedLocator, NodeModulesLocator, ToolLocator};
pub use types::*;
pub use webpack::WebpackExecutor;

/// Runs one bundler build.
///
/// Implementations perform exactly one attempt per call; there is no retry.
pub trait Executor {
  fn build(&self, request: &BuildRequest) -> impl Future<Output = Result<(), BundlerError>> + Send;
}
