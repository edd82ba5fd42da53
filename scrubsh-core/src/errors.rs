//! errors.rs - Custom error types for the scrubsh-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `scrubsh-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Invalid column specifier '{0}': columns must be positive integers (origin 1)")]
    InvalidColumn(String),

    #[error("Unknown redaction pass '{0}': expected one of phone, zip, email, name")]
    UnknownPass(String),

    #[error("Failed to compile redaction pattern '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] serde_yml::Error),

    #[error("Malformed CSV input: {0}")]
    CsvError(#[from] csv::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
