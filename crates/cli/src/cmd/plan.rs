//! Implementation of `steprun --plan`.
//!
//! Resolves the commands a run would execute and prints them without
//! running anything or changing directory.

use std::path::Path;

use anyhow::Result;
use steprun_lib::platform::Os;

use crate::output::{OutputFormat, print_command, print_info, print_json, print_stat};

pub fn cmd_plan(source_root: &Path, build_root: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
  let (invocation, plan) = super::resolve_plan(source_root, build_root, config)?;

  if format.is_json() {
    return print_json(&plan);
  }

  let platform = Os::current().map_or_else(|| std::env::consts::OS.to_string(), |os| os.to_string());

  print_info(&format!("Plan for {}", invocation.source_root().display()));
  print_stat("Platform", &platform);
  print_stat("Working directory", &plan.work_dir.display().to_string());
  print_stat("Build output", &invocation.build_root().display().to_string());
  print_stat(
    &format!("Search path ({})", plan.search_path_var),
    plan.run_search_path().unwrap_or_default(),
  );
  println!();
  print_command("compile", &plan.compile.command_line());
  print_command("run", &plan.run.command_line());

  Ok(())
}
