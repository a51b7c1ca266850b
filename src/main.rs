//! Command-line interface for the plain-text notes manager.

use std::process::ExitCode;

use clap::Parser;

mod cli;

use cli::{Cli, Colorize};

fn main() -> ExitCode {
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").failure());
            ExitCode::FAILURE
        }
    }
}
