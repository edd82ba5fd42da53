// scrubsh-core/src/engines/regex_engine.rs
//! A `RedactionEngine` implementation that applies the compiled redaction
//! passes one after the other, each pass working on the output of the last.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{EngineOptions, RedactionKind};
use crate::engine::RedactionEngine;
use crate::redaction_match::{log_redaction_action_debug, RedactionCounts};
use crate::sanitizers::compiler::{
    get_or_compile_patterns, CompiledPattern, CompiledPatterns, ReplacementPolicy,
};

#[derive(Debug, Clone)]
pub struct RegexEngine {
    compiled_patterns: Arc<CompiledPatterns>,
    options: EngineOptions,
}

impl RegexEngine {
    /// An engine running every pass.
    pub fn new() -> Result<Self> {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Result<Self> {
        let compiled_patterns = get_or_compile_patterns(&options)
            .context("Failed to compile redaction patterns for RegexEngine")?;

        Ok(Self {
            compiled_patterns,
            options,
        })
    }

    pub fn compiled_patterns(&self) -> &CompiledPatterns {
        &self.compiled_patterns
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

/// Replaces every non-overlapping match with the placeholder, leaving the
/// surrounding text untouched.
fn replace_substrings<'t>(
    matcher: &Regex,
    text: &'t str,
    placeholder: &str,
    kind: RedactionKind,
) -> (Cow<'t, str>, usize) {
    let mut occurrences = 0;
    let replaced = matcher.replace_all(text, |caps: &Captures<'_>| {
        occurrences += 1;
        log_redaction_action_debug(module_path!(), &caps[0], placeholder, kind);
        placeholder
    });
    (replaced, occurrences)
}

/// Rebuilds the unit as `lead + " " + placeholder + " " + trail` for each
/// successive match, but only when the template matches from the first
/// character. Otherwise the unit is returned unchanged.
fn replace_whole_unit<'t>(
    matcher: &Regex,
    text: &'t str,
    placeholder: &str,
    kind: RedactionKind,
) -> (Cow<'t, str>, usize) {
    let mut matches = matcher.captures_iter(text).peekable();
    let anchored = matches
        .peek()
        .and_then(|caps| caps.get(0))
        .is_some_and(|m| m.start() == 0);
    if !anchored {
        return (Cow::Borrowed(text), 0);
    }

    let mut rebuilt = String::with_capacity(text.len());
    let mut occurrences = 0;
    for caps in matches {
        let lead = caps.get(1).map_or("", |m| m.as_str());
        let trail = caps.get(caps.len() - 1).map_or("", |m| m.as_str());
        log_redaction_action_debug(module_path!(), &caps[0], placeholder, kind);
        rebuilt.push_str(lead);
        rebuilt.push(' ');
        rebuilt.push_str(placeholder);
        rebuilt.push(' ');
        rebuilt.push_str(trail);
        occurrences += 1;
    }
    (Cow::Owned(rebuilt), occurrences)
}

fn apply_pattern<'t>(pattern: &CompiledPattern, text: &'t str) -> (Cow<'t, str>, usize) {
    match (pattern.policy, pattern.matcher.as_ref()) {
        (ReplacementPolicy::Substring, Some(matcher)) => {
            replace_substrings(matcher, text, pattern.placeholder, pattern.kind)
        }
        (ReplacementPolicy::WholeUnit, Some(matcher)) => {
            replace_whole_unit(matcher, text, pattern.placeholder, pattern.kind)
        }
        _ => (Cow::Borrowed(text), 0),
    }
}

impl RedactionEngine for RegexEngine {
    fn redact_with_counts(&self, text: &str) -> (String, RedactionCounts) {
        let mut counts = RedactionCounts::new();
        let mut current: Cow<'_, str> = Cow::Borrowed(text);

        for pattern in &self.compiled_patterns.patterns {
            let (next, occurrences) = apply_pattern(pattern, &current);
            let rewritten = match next {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = rewritten {
                current = Cow::Owned(s);
            }
            counts.record(pattern.kind, occurrences);
        }

        (current.into_owned(), counts)
    }
}
