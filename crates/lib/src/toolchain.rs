//! Location of the external compiler and runtime.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::consts::{COMPILER_NAME, RUNTIME_NAME, TOOLCHAIN_HOME_VAR};

/// The pair of programs the runner invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolchain {
  /// Installation root, when one was found.
  pub home: Option<PathBuf>,
  pub compiler: PathBuf,
  pub runtime: PathBuf,
}

impl Toolchain {
  /// Resolve the tools under `home/bin`, or as bare names looked up on
  /// `PATH` when there is no home.
  pub fn from_home(home: Option<PathBuf>) -> Self {
    let compiler = tool_path(home.as_deref(), COMPILER_NAME);
    let runtime = tool_path(home.as_deref(), RUNTIME_NAME);
    Self { home, compiler, runtime }
  }

  /// Resolve from the toolchain home variable. An empty value counts as unset.
  pub fn detect() -> Self {
    let home = env::var_os(TOOLCHAIN_HOME_VAR)
      .filter(|value| !value.is_empty())
      .map(PathBuf::from);
    debug!(var = TOOLCHAIN_HOME_VAR, home = ?home, "detected toolchain home");
    Self::from_home(home)
  }

  /// Replace either program with an explicit path.
  pub fn with_overrides(mut self, compiler: Option<&Path>, runtime: Option<&Path>) -> Self {
    if let Some(compiler) = compiler {
      self.compiler = compiler.to_path_buf();
    }
    if let Some(runtime) = runtime {
      self.runtime = runtime.to_path_buf();
    }
    self
  }
}

fn tool_path(home: Option<&Path>, name: &str) -> PathBuf {
  let file = format!("{}{}", name, env::consts::EXE_SUFFIX);
  match home {
    Some(home) => home.join("bin").join(file),
    None => PathBuf::from(file),
  }
}
