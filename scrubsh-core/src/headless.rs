// scrubsh-core/src/headless.rs
// File: scrubsh-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for scrubbing in-memory documents without touching
//! files or standard streams.

use anyhow::{Context, Result};

use crate::config::ScrubConfig;
use crate::engines::regex_engine::RegexEngine;
use crate::scrubber::{RecordScrubber, ScrubMode};

/// Selects how the document is broken into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    Text,
    Csv,
}

/// Scrubs a whole document in one call.
///
/// # Arguments
///
/// * `config` - Disabled passes and, for CSV, the columns to leave alone.
/// * `mode` - Line-oriented text or CSV.
/// * `content` - The document to scrub.
pub fn headless_scrub_string(
    config: &ScrubConfig,
    mode: HeadlessMode,
    content: &str,
) -> Result<String> {
    let engine = RegexEngine::with_options(config.engine_options()?)?;
    let mode = match mode {
        HeadlessMode::Text => ScrubMode::Lines,
        HeadlessMode::Csv => ScrubMode::Csv(config.exemption_set()?),
    };
    let scrubber = RecordScrubber::new(engine, mode);

    let mut output = Vec::with_capacity(content.len());
    scrubber
        .scrub(content.as_bytes(), &mut output)
        .context("Headless scrub failed")?;

    String::from_utf8(output).context("Scrubbed output is not valid UTF-8")
}
