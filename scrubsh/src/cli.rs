//! This file defines the command-line interface (CLI) for the scrubsh
//! application, including both subcommands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "scrubsh",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact phone numbers, ZIP codes and email addresses from text and CSV files",
    long_about = "scrubsh replaces phone numbers, ZIP codes and email addresses with the placeholders <phoneRedac>, <zipRedac> and <emailRedac>. Text input is scrubbed line by line; CSV input is scrubbed field by field, optionally leaving selected columns untouched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress logging and the redaction summary.")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `scrubsh` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrubs a text file line by line.
    #[command(about = "Scrub every line of a text file or stdin.")]
    Text(TextCommand),

    /// Scrubs a CSV file field by field.
    #[command(about = "Scrub every field of a CSV file or stdin, except ignored columns.")]
    Csv(CsvCommand),
}

/// Arguments shared by both subcommands.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long = "infile", short = 'i', value_name = "FILE", help = "File containing text to scrub; default is stdin.")]
    pub infile: Option<PathBuf>,

    /// Write scrubbed output to this file instead of stdout.
    #[arg(long = "outfile", short = 'o', value_name = "FILE", help = "File to which scrubbed content is written; default is stdout.")]
    pub outfile: Option<PathBuf>,

    /// Path to a scrub configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", help = "Path to a scrub configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Redaction passes to skip (comma-separated).
    #[arg(long = "disable", short = 'x', value_name = "PASS", value_delimiter = ',', help = "Skip these redaction passes: phone, zip, email, name (comma-separated).")]
    pub disable: Vec<String>,

    /// Suppress the redaction summary.
    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `text` command.
#[derive(Args, Debug)]
pub struct TextCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the `csv` command.
#[derive(Args, Debug)]
pub struct CsvCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Columns to copy verbatim (origin 1). Validated before any I/O.
    #[arg(long = "ignorecol", short = 'c', value_name = "COL", num_args = 0.., help = "CSV columns to leave unscrubbed (origin 1); default: scrub all columns.")]
    pub ignorecol: Vec<String>,

    /// Also leave the legacy default columns (2 and 3) unscrubbed.
    #[arg(long = "legacy-columns", help = "Also leave columns 2 and 3 unscrubbed, as the legacy CSV anonymizer did.")]
    pub legacy_columns: bool,
}
