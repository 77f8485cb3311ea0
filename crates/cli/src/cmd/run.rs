//! Implementation of the default `steprun` action.
//!
//! Compiles the harness and runs it. In text mode the tools write straight
//! through to our streams; in JSON mode their output is only captured and
//! reported in the summary. Failures are returned to `main`, which maps them to an exit status.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use steprun_lib::{Invocation, ProcessRunner, RunReport, StepError, StepKind, StepOutput, run_steps};

use crate::output::{OutputFormat, format_duration, print_json, print_success};

/// JSON shape printed with `--output json`.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
  status: &'static str,
  source_root: &'a Path,
  build_root: &'a Path,
  exit_code: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  failed_step: Option<StepKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
  compile: Option<&'a StepOutput>,
  run: Option<&'a StepOutput>,
  #[serde(skip_serializing_if = "Option::is_none")]
  elapsed_ms: Option<u64>,
}

impl<'a> RunSummary<'a> {
  fn passed(invocation: &'a Invocation, report: &'a RunReport) -> Self {
    Self {
      status: "passed",
      source_root: invocation.source_root(),
      build_root: invocation.build_root(),
      exit_code: 0,
      failed_step: None,
      message: None,
      compile: Some(&report.compile),
      run: Some(&report.run),
      elapsed_ms: Some(report.elapsed.as_millis() as u64),
    }
  }

  fn failed(invocation: &'a Invocation, err: &'a StepError) -> Self {
    let output = err.output();
    Self {
      status: "failed",
      source_root: invocation.source_root(),
      build_root: invocation.build_root(),
      exit_code: err.exit_code(),
      failed_step: err.step(),
      message: Some(err.to_string()),
      compile: err.compile_output(),
      run: output.filter(|_| err.step() == Some(StepKind::Run)),
      elapsed_ms: None,
    }
  }
}

/// Execute the compile and run steps for the given directories.
pub fn cmd_run(source_root: &Path, build_root: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
  let (invocation, plan) = super::resolve_plan(source_root, build_root, config)?;

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let runner = if format.is_json() {
    ProcessRunner::captured()
  } else {
    ProcessRunner::echoing()
  };
  let result = rt.block_on(run_steps(&runner, &plan));

  match result {
    Ok(report) => {
      info!(elapsed = ?report.elapsed, "run complete");
      if format.is_json() {
        print_json(&RunSummary::passed(&invocation, &report))?;
      } else {
        print_success(&format!(
          "Compile and run succeeded in {}",
          format_duration(report.elapsed)
        ));
      }
      Ok(())
    }
    Err(err) => {
      if format.is_json() {
        print_json(&RunSummary::failed(&invocation, &err))?;
      }
      Err(err.into())
    }
  }
}
