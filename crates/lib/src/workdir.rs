//! Scoped change of the process working directory.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum WorkdirError {
  #[error("failed to read current directory")]
  Current(#[source] io::Error),

  #[error("failed to enter working directory {path}")]
  Enter {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Holds the process inside a directory until dropped.
///
/// The directory that was current at [`enter`](Self::enter) is restored on
/// drop, including when the holder returns early with an error or unwinds.
#[derive(Debug)]
pub struct WorkdirGuard {
  previous: PathBuf,
}

impl WorkdirGuard {
  pub fn enter(dir: &Path) -> Result<Self, WorkdirError> {
    let previous = std::env::current_dir().map_err(WorkdirError::Current)?;

    std::env::set_current_dir(dir).map_err(|source| WorkdirError::Enter {
      path: dir.to_path_buf(),
      source,
    })?;
    debug!(dir = %dir.display(), previous = %previous.display(), "entered working directory");

    Ok(Self { previous })
  }

  /// The directory that will be restored.
  pub fn previous(&self) -> &Path {
    &self.previous
  }
}

impl Drop for WorkdirGuard {
  fn drop(&mut self) {
    match std::env::set_current_dir(&self.previous) {
      Ok(()) => debug!(dir = %self.previous.display(), "restored working directory"),
      Err(err) => warn!(dir = %self.previous.display(), error = %err, "failed to restore working directory"),
    }
  }
}
