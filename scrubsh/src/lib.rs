// scrubsh/src/lib.rs
//! # scrubsh CLI Application
//!
//! Command-line front end for `scrubsh-core`: argument parsing, opening
//! files or standard streams, logging setup and the redaction summary.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
