//! Runner configuration.
//!
//! Holds the fixed harness locations (working subdirectory, source file,
//! binding archive, entry point). Every field has a default, so a config
//! file only needs to name what differs.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  CONFIG_FILENAME, DEFAULT_ARCHIVE, DEFAULT_CLASS_DIR, DEFAULT_ENTRY_POINT, DEFAULT_SOURCE_FILE, DEFAULT_WORK_DIR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid config {path}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
  /// Working subdirectory, relative to the source root.
  pub work_dir: PathBuf,
  /// Harness source file, relative to the working directory.
  pub source_file: PathBuf,
  /// Binding archive, relative to the source root.
  pub archive: PathBuf,
  /// Compiled class directory, relative to the working directory.
  pub class_dir: PathBuf,
  /// Main class handed to the runtime.
  pub entry_point: String,
  /// Explicit compiler program; overrides the toolchain.
  pub compiler: Option<PathBuf>,
  /// Explicit runtime program; overrides the toolchain.
  pub runtime: Option<PathBuf>,
  pub compiler_args: Vec<String>,
  pub runtime_args: Vec<String>,
}

impl Default for RunnerConfig {
  fn default() -> Self {
    Self {
      work_dir: PathBuf::from(DEFAULT_WORK_DIR),
      source_file: PathBuf::from(DEFAULT_SOURCE_FILE),
      archive: PathBuf::from(DEFAULT_ARCHIVE),
      class_dir: PathBuf::from(DEFAULT_CLASS_DIR),
      entry_point: DEFAULT_ENTRY_POINT.to_string(),
      compiler: None,
      runtime: None,
      compiler_args: Vec::new(),
      runtime_args: Vec::new(),
    }
  }
}

impl RunnerConfig {
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load the configuration for a run.
  ///
  /// An explicit path must exist. Otherwise `steprun.json` in the source
  /// root is used when present, and the defaults when it is not.
  pub fn load(explicit: Option<&Path>, source_root: &Path) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      debug!(path = %path.display(), "loading explicit config");
      return Self::from_file(path);
    }

    let candidate = source_root.join(CONFIG_FILENAME);
    if candidate.is_file() {
      debug!(path = %candidate.display(), "loading config from source root");
      return Self::from_file(&candidate);
    }

    Ok(Self::default())
  }
}
