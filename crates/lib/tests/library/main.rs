//! End-to-end library tests against a fake bundler executable.

#[cfg(unix)]
mod common;
#[cfg(unix)]
mod pipeline_tests;
