// scrubsh/src/main.rs
//! scrubsh entry point.
//!
//! Parses arguments, sets up logging and dispatches to the `text` or `csv`
//! command. Any error is printed to stderr and turns into a failing exit code.

use clap::Parser;
use std::process::ExitCode;

use scrubsh::cli::{Cli, Commands};
use scrubsh::commands::scrub::{error_msg, run_csv, run_text};
use scrubsh::logger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let result = match &cli.command {
        Commands::Text(cmd) => run_text(cmd, cli.quiet),
        Commands::Csv(cmd) => run_csv(cmd, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
