//! Shared test helpers for CLI integration tests.
//!
//! Builds a throwaway source tree, build directory and a fake JDK whose
//! `javac` and `java` are shell scripts that log their calls.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// How a fake tool should behave.
#[derive(Debug, Clone, Copy)]
pub enum Tool {
  Succeed,
  Fail(i32),
}

impl Tool {
  fn exit_code(self) -> i32 {
    match self {
      Tool::Succeed => 0,
      Tool::Fail(code) => code,
    }
  }
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding `src/`, `build/`,
/// `jdk/` and a `calls.log` the fake tools append to.
pub struct TestEnv {
  pub temp: TempDir,
  pub root: PathBuf,
}

impl TestEnv {
  pub fn new(javac: Tool, java: Tool) -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let env = Self { temp, root };

    env.write_file("src/tests/java/Main.java", "public class Main {}\n");
    env.write_file("src/bindings/java/binding.jar", "");
    std::fs::create_dir_all(env.build_root()).unwrap();

    let log = env.log_path();
    env.write_tool(
      "javac",
      &format!(
        "echo \"javac $*\" >> '{log}'\npwd > javac.cwd\necho 'javac diagnostics' >&2\nexit {code}\n",
        log = log.display(),
        code = javac.exit_code()
      ),
    );
    env.write_tool(
      "java",
      &format!(
        "echo \"java $*\" >> '{log}'\necho \"search=$LD_LIBRARY_PATH\"\necho 'harness output'\nexit {code}\n",
        log = log.display(),
        code = java.exit_code()
      ),
    );
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  fn write_tool(&self, name: &str, body: &str) {
    let relative = format!("jdk/bin/{}", name);
    self.write_file(&relative, &format!("#!/bin/sh\n{}", body));
    let path = self.root.join(relative);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  pub fn source_root(&self) -> PathBuf {
    self.root.join("src")
  }

  pub fn build_root(&self) -> PathBuf {
    self.root.join("build")
  }

  pub fn work_dir(&self) -> PathBuf {
    self.source_root().join("tests/java")
  }

  pub fn jdk_home(&self) -> PathBuf {
    self.root.join("jdk")
  }

  pub fn log_path(&self) -> PathBuf {
    self.root.join("calls.log")
  }

  /// Lines the fake tools logged, in call order.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .map(|content| content.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// A `steprun` command pointed at this environment's JDK and directories.
  pub fn steprun_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("steprun");
    cmd.env("JAVA_HOME", self.jdk_home());
    cmd.env_remove("RUST_LOG");
    cmd.arg(self.source_root()).arg(self.build_root());
    cmd
  }
}
