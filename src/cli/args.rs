//! CLI argument definitions using clap
//!
//! Commands:
//! - eventing replay [--config <path>] [--log <filter>]
//! - eventing check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Eventing - replay register/dispatch scripts against an in-memory UI tree
#[derive(Parser, Debug)]
#[command(name = "eventing")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read JSON operations from stdin, write dispatch results to stdout
    Replay {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log filter used when RUST_LOG is unset
        #[arg(long, default_value = "eventing=warn")]
        log: String,
    },

    /// Load and validate a configuration file, print the effective values
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./eventing.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
