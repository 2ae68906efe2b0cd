//! Managed runtime identifiers.
//!
//! A runtime is named by its identifier (e.g. `nodejs18.x`); the family is
//! inferred from the identifier prefix. Only the Node.js family can run a
//! bundled artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language family of a managed runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeFamily {
  NodeJs,
  Python,
  Java,
  DotNet,
  Go,
  Ruby,
  Provided,
  Other,
}

impl RuntimeFamily {
  /// Infer the family from a runtime identifier.
  pub fn of(name: &str) -> Self {
    const PREFIXES: &[(&str, RuntimeFamily)] = &[
      ("nodejs", RuntimeFamily::NodeJs),
      ("python", RuntimeFamily::Python),
      ("java", RuntimeFamily::Java),
      ("dotnet", RuntimeFamily::DotNet),
      ("go", RuntimeFamily::Go),
      ("ruby", RuntimeFamily::Ruby),
      ("provided", RuntimeFamily::Provided),
    ];

    PREFIXES
      .iter()
      .find(|(prefix, _)| name.starts_with(prefix))
      .map(|(_, family)| *family)
      .unwrap_or(RuntimeFamily::Other)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NodeJs => "nodejs",
      Self::Python => "python",
      Self::Java => "java",
      Self::DotNet => "dotnet",
      Self::Go => "go",
      Self::Ruby => "ruby",
      Self::Provided => "provided",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for RuntimeFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A managed runtime, e.g. `nodejs14.x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Runtime {
  name: String,
}

impl Runtime {
  pub const NODEJS_12_X: &'static str = "nodejs12.x";
  pub const NODEJS_14_X: &'static str = "nodejs14.x";
  pub const NODEJS_16_X: &'static str = "nodejs16.x";
  pub const NODEJS_18_X: &'static str = "nodejs18.x";
  pub const NODEJS_20_X: &'static str = "nodejs20.x";
  pub const NODEJS_22_X: &'static str = "nodejs22.x";
  pub const PYTHON_3_12: &'static str = "python3.12";

  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn family(&self) -> RuntimeFamily {
    RuntimeFamily::of(&self.name)
  }

  pub fn is_supported(&self) -> bool {
    self.family() == RuntimeFamily::NodeJs
  }
}

/// The platform's default runtime, used when none is configured.
impl Default for Runtime {
  fn default() -> Self {
    Self::new(Self::NODEJS_14_X)
  }
}

impl fmt::Display for Runtime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

impl FromStr for Runtime {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::new(s.trim()))
  }
}

impl Serialize for Runtime {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.name)
  }
}

impl<'de> Deserialize<'de> for Runtime {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(Self::new)
  }
}
