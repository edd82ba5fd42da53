//! compiler.rs - Builds the ordered set of redaction patterns.
//!
//! The built-in passes (phone, ZIP, email, name) are compiled into a
//! `CompiledPatterns` list whose order is the order of application. The
//! all-enabled set is compiled once per process and shared.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::config::{EngineOptions, RedactionKind};
use crate::errors::ScrubError;

/// North American phone numbers: optional `+1`, optional (parenthesised)
/// area code, exchange, subscriber number and an optional extension.
pub const PHONE_PATTERN: &str = concat!(
    r"(?:(?:\+?1\s*(?:[.-]\s*)?)?",
    r"(?:\(\s*([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9])\s*\)|([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]))",
    r"\s*(?:[.-]\s*)?)?",
    r"([2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2})",
    r"\s*(?:[.-]\s*)?",
    r"([0-9]{4})",
    r"(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?",
);

/// Five digits, optionally followed by a hyphen or whitespace and four more.
pub const ZIP_PATTERN: &str = r"\d{5}(?:[-\s]\d{4})?";

/// Whole-unit email template. Group 1 is the leading text and the last group
/// the trailing text; everything in between is replaced.
pub const EMAIL_PATTERN: &str = r"(.*)\s+([a-zA-Z0-9\(\.\-]+)[@]([a-zA-Z0-9\.]+)(.)(edu|com)\s*(.*)";

/// How a pattern's matches are turned into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPolicy {
    /// Every non-overlapping match is replaced by the placeholder.
    Substring,
    /// The unit must match from its first character; the leading and trailing
    /// captures survive around the placeholder.
    WholeUnit,
    /// The text is returned unchanged.
    PassThrough,
}

/// A single compiled redaction pass.
#[derive(Debug)]
pub struct CompiledPattern {
    pub kind: RedactionKind,
    /// `None` for pass-through patterns.
    pub matcher: Option<Regex>,
    pub placeholder: &'static str,
    pub policy: ReplacementPolicy,
}

/// The ordered list of passes an engine applies.
#[derive(Debug)]
pub struct CompiledPatterns {
    pub patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    pub fn kinds(&self) -> Vec<RedactionKind> {
        self.patterns.iter().map(|p| p.kind).collect()
    }
}

static DEFAULT_PATTERNS: Lazy<Result<Arc<CompiledPatterns>, String>> = Lazy::new(|| {
    compile_patterns(&EngineOptions::default())
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

fn source_and_policy(kind: RedactionKind) -> (Option<&'static str>, ReplacementPolicy) {
    match kind {
        RedactionKind::Phone => (Some(PHONE_PATTERN), ReplacementPolicy::Substring),
        RedactionKind::Zip => (Some(ZIP_PATTERN), ReplacementPolicy::Substring),
        RedactionKind::Email => (Some(EMAIL_PATTERN), ReplacementPolicy::WholeUnit),
        // No context-free name list tells a person's name from an ordinary
        // English word, so this pass stays an identity function.
        RedactionKind::Name => (None, ReplacementPolicy::PassThrough),
    }
}

/// Compiles the built-in passes, in application order, skipping the ones the
/// options disable.
pub fn compile_patterns(options: &EngineOptions) -> Result<CompiledPatterns, ScrubError> {
    let mut patterns = Vec::with_capacity(RedactionKind::ALL.len());

    for kind in RedactionKind::ALL {
        if !options.is_enabled(kind) {
            debug!("Pass '{}' disabled; not compiling it.", kind);
            continue;
        }
        let (source, policy) = source_and_policy(kind);
        let matcher = match source {
            Some(pattern) => Some(
                RegexBuilder::new(pattern)
                    .size_limit(10 * (1 << 20))
                    .build()
                    .map_err(|e| ScrubError::PatternCompilationError(kind.to_string(), e))?,
            ),
            None => None,
        };
        log::debug!(
            target: "scrubsh_core::sanitizer",
            "Pattern '{}' compiled successfully.",
            kind
        );
        patterns.push(CompiledPattern {
            kind,
            matcher,
            placeholder: kind.placeholder(),
            policy,
        });
    }

    debug!("Finished compiling patterns. Total compiled: {}.", patterns.len());
    Ok(CompiledPatterns { patterns })
}

/// Returns the shared, all-enabled pattern set, or compiles a dedicated one
/// when some passes are disabled.
pub fn get_or_compile_patterns(
    options: &EngineOptions,
) -> Result<Arc<CompiledPatterns>, ScrubError> {
    if !options.disabled_passes.is_empty() {
        return compile_patterns(options).map(Arc::new);
    }
    match &*DEFAULT_PATTERNS {
        Ok(patterns) => {
            debug!("Serving default patterns from the process-wide set.");
            Ok(Arc::clone(patterns))
        }
        // Built-in sources are constants, so this only recompiles to surface
        // the original error value.
        Err(_) => compile_patterns(options).map(Arc::new),
    }
}
