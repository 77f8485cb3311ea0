mod plan;
mod run;

pub use plan::cmd_plan;
pub use run::cmd_run;

use std::path::Path;

use anyhow::{Context, Result};
use steprun_lib::{Invocation, RunnerConfig, StepPlan};
use tracing::debug;

/// Capture the invocation, load the config and resolve the step plan.
fn resolve_plan(source_root: &Path, build_root: &Path, config: Option<&Path>) -> Result<(Invocation, StepPlan)> {
  let invocation = Invocation::new(source_root, build_root).context("Failed to resolve input directories")?;
  let config = RunnerConfig::load(config, invocation.source_root())?;
  debug!(?config, "loaded runner config");

  let plan = StepPlan::from_env(&invocation, &config).context("Failed to prepare steps")?;
  Ok((invocation, plan))
}
