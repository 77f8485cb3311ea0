//! steprun-lib: compile-then-run step runner for binding test harnesses
//!
//! This crate provides the pieces of a single fail-fast run:
//! - `Invocation`: the source root and build output root a run is given
//! - `RunnerConfig`: fixed harness locations, optionally read from JSON
//! - `StepPlan`: the resolved compile and run commands
//! - `run_steps`: executes the plan inside a scoped working directory

pub mod command;
pub mod config;
pub mod consts;
pub mod invocation;
pub mod platform;
pub mod steps;
pub mod toolchain;
pub mod util;
pub mod workdir;

pub use command::{CommandRunner, CommandSpec, ProcessRunner, StepOutput};
pub use config::{ConfigError, RunnerConfig};
pub use invocation::Invocation;
pub use steps::{RunReport, StepError, StepKind, StepPlan, run_steps};
pub use toolchain::Toolchain;
pub use workdir::{WorkdirError, WorkdirGuard};
