//! Hashing utilities for unique build paths.
//!
//! This module provides:
//! - `PathHash`: A full 64-character SHA-256 of an entry path string
//! - `hash_path()`: Hash a path exactly as it was supplied
//! - `hash_bytes()`: Arbitrary byte hashing

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A SHA-256 digest identifying a unique build directory.
///
/// Only the path string is hashed, never the file contents, so the same entry
/// always maps to the same directory across invocations.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathHash(pub String);

impl std::fmt::Display for PathHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<Path> for PathHash {
  fn as_ref(&self) -> &Path {
    Path::new(&self.0)
  }
}

/// Hash a path as written, without normalizing or resolving it.
///
/// `src/handler.ts` and `./src/handler.ts` therefore hash differently.
pub fn hash_path(path: &Path) -> PathHash {
  hash_bytes(path.to_string_lossy().as_bytes())
}

/// Hash arbitrary bytes.
///
/// Returns the full 64-character SHA256 hash.
pub fn hash_bytes(data: &[u8]) -> PathHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  PathHash(hex::encode(hasher.finalize()))
}
