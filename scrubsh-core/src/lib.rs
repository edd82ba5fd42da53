// scrubsh-core/src/lib.rs
//! # scrubsh Core Library
//!
//! `scrubsh-core` removes phone numbers, ZIP codes and email addresses from
//! free text and CSV records, replacing each match with a fixed placeholder
//! (`<phoneRedac>`, `<zipRedac>`, `<emailRedac>`).
//!
//! The library is pure with respect to the text it transforms: the
//! `RedactionEngine` maps one string to another, and the `RecordScrubber`
//! drives an engine over any `BufRead`/`Write` pair. Opening files and
//! parsing command lines is left to the caller.
//!
//! ## Modules
//!
//! * `config`: Pass kinds and placeholders, `ExemptionSet`, `EngineOptions`, `ScrubConfig`.
//! * `sanitizers`: Compiles the built-in passes into an ordered pattern list.
//! * `engine`: Defines the `RedactionEngine` trait.
//! * `engines`: The regex-backed engine.
//! * `scrubber`: Line-mode and CSV-mode record scrubbing.
//! * `redaction_match`: Redaction counts and PII-safe logging helpers.
//! * `headless`: One-shot scrubbing of in-memory documents.
//!
//! ## Pass order
//!
//! Passes run phone, then ZIP, then email, then name. Each pass sees the
//! output of the previous one, so digits already inside a phone redaction
//! can never be picked up again as a ZIP code. The name pass is an identity
//! function: a context-free name list cannot tell names from ordinary words.
//!
//! ## Usage Example
//!
//! ```rust
//! use scrubsh_core::{ExemptionSet, RecordScrubber, RedactionEngine, RegexEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = RegexEngine::new()?;
//!     assert_eq!(engine.redact("A zipcode is 94025"), "A zipcode is <zipRedac>");
//!
//!     let scrubber = RecordScrubber::csv(engine, ExemptionSet::from_one_based(&["1"])?);
//!     let mut out = Vec::new();
//!     scrubber.scrub("650-327-7398,650-327-7398\n".as_bytes(), &mut out)?;
//!     assert_eq!(String::from_utf8(out)?, "650-327-7398,<phoneRedac>\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration and stream errors are reported as `ScrubError`; functions
//! that stitch several steps together return `anyhow::Result` with context.
//! A missing match is never an error.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod redaction_match;
pub mod sanitizers;
pub mod scrubber;

/// Re-exports the configuration types.
pub use config::{
    EngineOptions,
    ExemptionSet,
    RedactionKind,
    ScrubConfig,
    EMAIL_PLACEHOLDER,
    LEGACY_EXEMPT_COLUMNS,
    NAME_PLACEHOLDER,
    PHONE_PLACEHOLDER,
    ZIP_PLACEHOLDER,
};

pub use errors::ScrubError;

pub use engine::RedactionEngine;
pub use engines::regex_engine::RegexEngine;

pub use redaction_match::{redact_sensitive, RedactionCounts, RedactionSummaryItem};

pub use scrubber::{RecordScrubber, ScrubMode, ScrubReport};

pub use headless::{headless_scrub_string, HeadlessMode};

pub use sanitizers::compiler::{
    compile_patterns, CompiledPattern, CompiledPatterns, ReplacementPolicy,
};
