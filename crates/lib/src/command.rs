//! External command invocation.
//!
//! Both steps describe their tool call as a [`CommandSpec`] and hand it to a
//! [`CommandRunner`]. The production runner spawns a real process; tests swap
//! in a recording fake.

use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

/// A program to run, with its arguments, environment overrides and working
/// directory.
///
/// Environment overrides are layered on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub env: BTreeMap<String, String>,
  pub cwd: Option<PathBuf>,
}

impl CommandSpec {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      env: BTreeMap::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// Program and arguments as a single display line.
  pub fn command_line(&self) -> String {
    let mut line = self.program.display().to_string();
    for arg in &self.args {
      line.push(' ');
      if arg.is_empty() || arg.contains(char::is_whitespace) {
        line.push('"');
        line.push_str(arg);
        line.push('"');
      } else {
        line.push_str(arg);
      }
    }
    line
  }
}

/// Exit status and captured output of one external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepOutput {
  /// `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl StepOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs a [`CommandSpec`] to completion.
///
/// An `Err` means the program could not be started at all; a program that
/// starts and exits non-zero is an `Ok` with a failing [`StepOutput`].
pub trait CommandRunner {
  fn run(&self, spec: &CommandSpec) -> impl Future<Output = io::Result<StepOutput>> + Send;
}

/// Spawns real child processes and captures their output.
///
/// With echo enabled, output is also copied to this process's stdout and
/// stderr as it arrives, so a long-running tool is visible while it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
  echo: bool,
}

impl ProcessRunner {
  /// Capture output without printing it.
  pub fn captured() -> Self {
    Self { echo: false }
  }

  /// Capture output and echo it live.
  pub fn echoing() -> Self {
    Self { echo: true }
  }
}

impl CommandRunner for ProcessRunner {
  async fn run(&self, spec: &CommandSpec) -> io::Result<StepOutput> {
    let mut command = Command::new(&spec.program);
    command
      .args(&spec.args)
      .envs(&spec.env)
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true);
    if let Some(cwd) = &spec.cwd {
      command.current_dir(cwd);
    }

    debug!(program = %spec.program.display(), cwd = ?spec.cwd, echo = self.echo, "spawning process");

    let mut child = command.spawn()?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout, stderr, status) = tokio::try_join!(
      tee(stdout, self.echo.then(tokio::io::stdout)),
      tee(stderr, self.echo.then(tokio::io::stderr)),
      child.wait(),
    )?;

    let result = StepOutput {
      code: status.code(),
      stdout,
      stderr,
    };

    if !result.stdout.is_empty() {
      debug!(stdout = %result.stdout, "command stdout");
    }
    if !result.stderr.is_empty() {
      debug!(stderr = %result.stderr, "command stderr");
    }

    Ok(result)
  }
}

/// Read a child pipe to the end, optionally copying each chunk to `echo`.
async fn tee<R, W>(reader: Option<R>, mut echo: Option<W>) -> io::Result<String>
where
  R: AsyncRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let Some(mut reader) = reader else {
    return Ok(String::new());
  };

  let mut captured = Vec::new();
  let mut buf = [0u8; 8192];
  loop {
    let n = reader.read(&mut buf).await?;
    if n == 0 {
      break;
    }
    captured.extend_from_slice(&buf[..n]);
    if let Some(echo) = echo.as_mut() {
      echo.write_all(&buf[..n]).await?;
      echo.flush().await?;
    }
  }

  Ok(String::from_utf8_lossy(&captured).into_owned())
}
