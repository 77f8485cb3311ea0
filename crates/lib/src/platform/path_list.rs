//! Ordered path lists joined with the platform separator.
//!
//! Used for both the native library search path handed to the run step and
//! the Java classpath, which share the same separator (`;` on Windows, `:`
//! elsewhere).

use std::env::{self, JoinPathsError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathList {
  entries: Vec<PathBuf>,
}

impl PathList {
  pub fn new() -> Self {
    Self::default()
  }

  /// Split a separator-joined value. Empty segments are dropped.
  pub fn parse(value: &OsStr) -> Self {
    Self {
      entries: env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect(),
    }
  }

  /// Read the current value of `var` from the process environment.
  ///
  /// A missing variable yields an empty list.
  pub fn from_env(var: &str) -> Self {
    env::var_os(var).map(|value| Self::parse(&value)).unwrap_or_default()
  }

  /// Insert `dir` ahead of every existing entry.
  pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
    self.entries.insert(0, dir.into());
  }

  pub fn entries(&self) -> &[PathBuf] {
    &self.entries
  }

  pub fn first(&self) -> Option<&Path> {
    self.entries.first().map(PathBuf::as_path)
  }

  pub fn contains(&self, dir: &Path) -> bool {
    self.entries.iter().any(|entry| entry == dir)
  }

  /// Join the entries with the platform separator.
  ///
  /// Fails if an entry itself contains the separator.
  pub fn join(&self) -> Result<OsString, JoinPathsError> {
    env::join_paths(&self.entries)
  }
}

impl<P: Into<PathBuf>> FromIterator<P> for PathList {
  fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().map(Into::into).collect(),
    }
  }
}
