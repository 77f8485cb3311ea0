mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use steprun_lib::StepError;
use steprun_lib::consts::{EXIT_SETUP_FAILURE, EXIT_USAGE};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0   compile and run succeeded
  1   compile step failed
  2   run step failed
  3   setup failed (config, working directory, path lists)
  64  invalid command-line usage";

/// steprun - compile a Java test harness and run it against native bindings
#[derive(Parser)]
#[command(name = "steprun")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXIT_STATUS_HELP)]
struct Cli {
  /// Source root containing the test harness and the binding archive
  source_root: PathBuf,

  /// Build output directory holding the native libraries
  build_root: PathBuf,

  /// Runner configuration file (default: steprun.json in the source root)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Print the commands that would run without executing them
  #[arg(long)]
  plan: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) if err.use_stderr() => {
      let _ = err.print();
      return ExitCode::from(EXIT_USAGE);
    }
    Err(err) => err.exit(),
  };

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = if cli.plan {
    cmd::cmd_plan(&cli.source_root, &cli.build_root, cli.config.as_deref(), cli.output)
  } else {
    cmd::cmd_run(&cli.source_root, &cli.build_root, cli.config.as_deref(), cli.output)
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      let code = err
        .downcast_ref::<StepError>()
        .map(StepError::exit_code)
        .unwrap_or(EXIT_SETUP_FAILURE);
      ExitCode::from(code)
    }
  }
}
