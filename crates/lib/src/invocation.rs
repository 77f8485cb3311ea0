//! The two directories a run is invoked with.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Source root and build output root for one run.
///
/// Both are made absolute when captured so that later directory changes do
/// not alter what they point at. Existence is not checked here; a missing
/// directory surfaces when a step tries to use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  source_root: PathBuf,
  build_root: PathBuf,
}

impl Invocation {
  pub fn new(source_root: impl AsRef<Path>, build_root: impl AsRef<Path>) -> io::Result<Self> {
    Ok(Self {
      source_root: absolutize(source_root.as_ref())?,
      build_root: absolutize(build_root.as_ref())?,
    })
  }

  pub fn source_root(&self) -> &Path {
    &self.source_root
  }

  pub fn build_root(&self) -> &Path {
    &self.build_root
  }
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
  let absolute = std::path::absolute(path)?;
  Ok(dunce::simplified(&absolute).to_path_buf())
}
