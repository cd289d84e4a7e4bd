// CLI module
// Command-line interface, argument parsing and log setup

mod args;

pub use args::{CliArgs, OutputFormat, StrategyType};

use clap::Parser;
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the error or help text and
/// exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the global tracing subscriber
///
/// Diagnostics go to stderr so stdout carries only the program's output.
/// `RUST_LOG` takes precedence over `default_level` when it is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
