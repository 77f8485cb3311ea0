//! The compile-then-run step sequence.
//!
//! A [`StepPlan`] is resolved up front from the invocation, configuration
//! and toolchain. [`run_steps`] then enters the harness directory, compiles,
//! and only on success runs the harness. The previous working directory is
//! restored on every exit path.

use std::env::JoinPathsError;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, CommandSpec, StepOutput};
use crate::config::RunnerConfig;
use crate::consts::{EXIT_COMPILE_FAILURE, EXIT_RUN_FAILURE, EXIT_SETUP_FAILURE};
use crate::invocation::Invocation;
use crate::platform::{PathList, library_path_var};
use crate::toolchain::Toolchain;
use crate::workdir::{WorkdirError, WorkdirGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
  Compile,
  Run,
}

impl StepKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Compile => "compile",
      Self::Run => "run",
    }
  }

  pub fn exit_code(&self) -> u8 {
    match self {
      Self::Compile => EXIT_COMPILE_FAILURE,
      Self::Run => EXIT_RUN_FAILURE,
    }
  }
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum StepError {
  /// The compiler ran and reported failure.
  #[error("compile step failed ({})", describe_code(.output.code))]
  CompileFailure { output: StepOutput },

  /// The harness ran and reported failure. `compile` holds the output of
  /// the compile step that preceded it.
  #[error("run step failed ({})", describe_code(.output.code))]
  RunFailure { compile: StepOutput, output: StepOutput },

  /// The tool for a step could not be started.
  #[error("{step} step failed: could not launch {program}", program = .program.display())]
  Launch {
    step: StepKind,
    program: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Workdir(#[from] WorkdirError),

  /// A path list could not be joined for the platform.
  #[error("cannot assemble {name}")]
  PathList {
    name: String,
    #[source]
    source: JoinPathsError,
  },
}

impl StepError {
  /// The step this error belongs to, if any.
  pub fn step(&self) -> Option<StepKind> {
    match self {
      Self::CompileFailure { .. } => Some(StepKind::Compile),
      Self::RunFailure { .. } => Some(StepKind::Run),
      Self::Launch { step, .. } => Some(*step),
      Self::Workdir(_) | Self::PathList { .. } => None,
    }
  }

  /// Captured output of the failing tool, when it ran.
  pub fn output(&self) -> Option<&StepOutput> {
    match self {
      Self::CompileFailure { output } | Self::RunFailure { output, .. } => Some(output),
      _ => None,
    }
  }

  /// Captured compiler output, whichever step failed.
  pub fn compile_output(&self) -> Option<&StepOutput> {
    match self {
      Self::CompileFailure { output } => Some(output),
      Self::RunFailure { compile, .. } => Some(compile),
      _ => None,
    }
  }

  /// Process exit status for this failure.
  pub fn exit_code(&self) -> u8 {
    self.step().map(|step| step.exit_code()).unwrap_or(EXIT_SETUP_FAILURE)
  }

  fn failed(step: StepKind, output: StepOutput, compile: Option<&StepOutput>) -> Self {
    match step {
      StepKind::Compile => Self::CompileFailure { output },
      StepKind::Run => Self::RunFailure {
        compile: compile.cloned().unwrap_or_default(),
        output,
      },
    }
  }
}

fn describe_code(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}

/// Fully resolved commands for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepPlan {
  /// Directory held for the duration of the run.
  pub work_dir: PathBuf,
  pub compile: CommandSpec,
  pub run: CommandSpec,
  /// Native library search variable set on the run step.
  pub search_path_var: String,
}

impl StepPlan {
  /// Build the plan from explicit inputs.
  ///
  /// `inherited_search_path` is the current value of `search_path_var`; the
  /// build root is prepended to it for the run step.
  pub fn new(
    invocation: &Invocation,
    config: &RunnerConfig,
    toolchain: &Toolchain,
    search_path_var: &str,
    mut inherited_search_path: PathList,
  ) -> Result<Self, StepError> {
    let work_dir = invocation.source_root().join(&config.work_dir);
    let archive = invocation.source_root().join(&config.archive);
    let build_root = invocation.build_root();

    let compile_classpath: PathList = [archive.clone()].into_iter().collect();
    let compile = CommandSpec::new(&toolchain.compiler)
      .args(config.compiler_args.iter().cloned())
      .arg("-cp")
      .arg(join_lossy(&compile_classpath, "compile classpath")?)
      .arg(config.source_file.to_string_lossy())
      .current_dir(&work_dir);

    let run_classpath: PathList = [config.class_dir.clone(), archive].into_iter().collect();
    inherited_search_path.prepend(build_root);
    let run = CommandSpec::new(&toolchain.runtime)
      .args(config.runtime_args.iter().cloned())
      .arg(format!("-Djava.library.path={}", build_root.display()))
      .arg("-cp")
      .arg(join_lossy(&run_classpath, "run classpath")?)
      .arg(config.entry_point.as_str())
      .env(search_path_var, join_lossy(&inherited_search_path, search_path_var)?)
      .current_dir(&work_dir);

    Ok(Self {
      work_dir,
      compile,
      run,
      search_path_var: search_path_var.to_string(),
    })
  }

  /// Build the plan using the toolchain and search path of the current
  /// process environment. The environment is only read.
  pub fn from_env(invocation: &Invocation, config: &RunnerConfig) -> Result<Self, StepError> {
    let toolchain = Toolchain::detect().with_overrides(config.compiler.as_deref(), config.runtime.as_deref());
    let var = library_path_var();
    Self::new(invocation, config, &toolchain, var, PathList::from_env(var))
  }

  /// The search path value handed to the run step.
  pub fn run_search_path(&self) -> Option<&str> {
    self.run.env.get(&self.search_path_var).map(String::as_str)
  }
}

fn join_lossy(list: &PathList, name: &str) -> Result<String, StepError> {
  list
    .join()
    .map(|joined| joined.to_string_lossy().into_owned())
    .map_err(|source| StepError::PathList {
      name: name.to_string(),
      source,
    })
}

/// Outputs of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub compile: StepOutput,
  pub run: StepOutput,
  pub elapsed: Duration,
}

/// Execute the plan: enter the working directory, compile, then run.
///
/// The run step is never started unless compilation succeeded. The working
/// directory is restored before this returns, whether it succeeds or fails.
pub async fn run_steps<R: CommandRunner>(runner: &R, plan: &StepPlan) -> Result<RunReport, StepError> {
  let started = Instant::now();
  let workdir = WorkdirGuard::enter(&plan.work_dir)?;
  info!(dir = %plan.work_dir.display(), previous = %workdir.previous().display(), "running steps");

  let compile = execute_step(runner, StepKind::Compile, &plan.compile, None).await?;
  let run = execute_step(runner, StepKind::Run, &plan.run, Some(&compile)).await?;

  let elapsed = started.elapsed();
  info!(elapsed_ms = elapsed.as_millis() as u64, "all steps succeeded");

  Ok(RunReport { compile, run, elapsed })
}

async fn execute_step<R: CommandRunner>(
  runner: &R,
  step: StepKind,
  spec: &CommandSpec,
  compile: Option<&StepOutput>,
) -> Result<StepOutput, StepError> {
  info!(step = %step, cmd = %spec.command_line(), "starting step");
  if !spec.env.is_empty() {
    debug!(step = %step, env = ?spec.env, "step environment overrides");
  }

  let output = runner.run(spec).await.map_err(|source| StepError::Launch {
    step,
    program: spec.program.clone(),
    source,
  })?;

  if !output.success() {
    warn!(step = %step, code = ?output.code, "step failed");
    return Err(StepError::failed(step, output, compile));
  }

  info!(step = %step, "step succeeded");
  Ok(output)
}
