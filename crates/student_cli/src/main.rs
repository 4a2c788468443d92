//! Student registry CLI entry point.
//!
//! # Responsibility
//! - Parse arguments and delegate to `commands::run`.
//! - Print a user-facing notice to stderr and exit non-zero on failure.

mod args;
mod commands;
mod config;
mod form;

use args::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = commands::run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
