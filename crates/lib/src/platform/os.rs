use std::fmt;

/// Operating system variants steprun knows how to configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Returns the variable the dynamic loader consults for native libraries.
  ///
  /// Windows has no dedicated variable; DLLs are searched along `PATH`.
  pub fn library_path_var(&self) -> &'static str {
    match self {
      Self::Linux => "LD_LIBRARY_PATH",
      Self::MacOs => "DYLD_LIBRARY_PATH",
      Self::Windows => "PATH",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Returns the native library search variable for the current system.
///
/// Unrecognised Unix-likes fall back to `LD_LIBRARY_PATH`.
pub fn library_path_var() -> &'static str {
  match Os::current() {
    Some(os) => os.library_path_var(),
    None if cfg!(windows) => "PATH",
    None => "LD_LIBRARY_PATH",
  }
}
