//! CLI module for eventing
//!
//! Provides command-line interface for:
//! - replay: drive a registry from JSON lines on stdin
//! - check-config: validate a configuration file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, replay, run_command, Operation};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_operations, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
