//! eventing CLI entry point
//!
//! All logic is delegated to the CLI module. Errors go to stderr with a
//! non-zero exit code.

use eventing::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
