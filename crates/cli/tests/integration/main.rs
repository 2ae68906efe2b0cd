//! CLI integration tests for fnpack.

mod common;

#[cfg(unix)]
mod build_all_tests;
