//! fnpack-lib: Core types and logic for fnpack
//!
//! This crate prepares bundled function code for a serverless runtime:
//! - `FunctionBuildProps`: raw, user-supplied build configuration
//! - `resolve`: validates props, derives output paths, and runs the bundler
//! - `bundler`: locates and invokes the external bundler CLI
//! - `function`: descriptors handed to the packaging layer
//! - `manifest`: multi-function manifests built concurrently

pub mod bundler;
pub mod consts;
pub mod function;
pub mod manifest;
pub mod props;
pub mod resolve;
pub mod runtime;
pub mod util;
