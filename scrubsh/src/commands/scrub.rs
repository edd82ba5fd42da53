//! `text` and `csv` command implementations.
//!
//! Configuration is resolved completely before any stream is opened, and the
//! input is opened before the output, so a bad column list or a missing
//! input file never creates or truncates the output file.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use scrubsh_core::{RecordScrubber, RedactionEngine, RegexEngine, ScrubConfig, ScrubReport};

use crate::cli::{CommonArgs, CsvCommand, TextCommand};
use crate::ui::{output_format, redaction_summary};

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ =
        output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ =
        output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Loads the optional config file and layers command-line values on top.
pub fn resolve_config(
    config_path: Option<&Path>,
    ignore_columns: &[String],
    disabled_passes: &[String],
    legacy_columns: bool,
) -> Result<ScrubConfig> {
    let base = match config_path {
        Some(path) => ScrubConfig::load_from_file(path)?,
        None => ScrubConfig::default(),
    };
    let config = base
        .merge_cli(ignore_columns, disabled_passes, legacy_columns)
        .context("Invalid scrub configuration")?;
    debug!("Resolved scrub configuration: {:?}", config);
    Ok(config)
}

/// Opens the input file, or locks stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Creates the output file, or locks stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn run_text(cmd: &TextCommand, quiet: bool) -> Result<()> {
    let config = resolve_config(cmd.common.config.as_deref(), &[], &cmd.common.disable, false)?;
    let engine = RegexEngine::with_options(config.engine_options()?)?;
    info!("Using line mode.");
    run_scrubber(&RecordScrubber::lines(engine), &cmd.common, quiet)
}

pub fn run_csv(cmd: &CsvCommand, quiet: bool) -> Result<()> {
    let config = resolve_config(
        cmd.common.config.as_deref(),
        &cmd.ignorecol,
        &cmd.common.disable,
        cmd.legacy_columns,
    )?;
    let exemptions = config.exemption_set()?;
    let engine = RegexEngine::with_options(config.engine_options()?)?;
    info!(
        "Using CSV mode; unscrubbed columns (origin 1): {:?}",
        exemptions.iter().map(|i| i + 1).collect::<Vec<_>>()
    );
    run_scrubber(&RecordScrubber::csv(engine, exemptions), &cmd.common, quiet)
}

fn run_scrubber<E: RedactionEngine>(
    scrubber: &RecordScrubber<E>,
    common: &CommonArgs,
    quiet: bool,
) -> Result<()> {
    let input = open_input(common.infile.as_deref())?;
    let output = open_output(common.outfile.as_deref())?;

    if let (Some(path), false) = (&common.outfile, quiet) {
        info_msg(format!("Writing scrubbed content to file: {}", path.display()));
    }

    // Both handles move into `scrub` and are closed when it returns, on
    // success and on error alike.
    let report = scrubber.scrub(input, output).context("Scrubbing failed")?;

    handle_redaction_summary(&report, common, quiet)?;
    Ok(())
}

fn handle_redaction_summary(report: &ScrubReport, common: &CommonArgs, quiet: bool) -> Result<()> {
    if !common.no_summary && !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(report, &mut io::stderr(), stderr_supports_color)?;
    }
    Ok(())
}
