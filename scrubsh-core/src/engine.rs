// scrubsh-core/src/engine.rs
//! Defines the core `RedactionEngine` trait.
//!
//! The record scrubber only depends on this trait, so the way a unit of text
//! is redacted stays independent of how units are read and written.
//!
//! License: MIT OR APACHE 2.0

use crate::redaction_match::RedactionCounts;

/// A pure transformation from one unit of text to its redacted form.
///
/// Implementations must be deterministic and total: every input string,
/// including the empty string, yields an output string.
pub trait RedactionEngine: Send + Sync {
    /// Redacts `text` and reports how many replacements each pass made.
    fn redact_with_counts(&self, text: &str) -> (String, RedactionCounts);

    /// Redacts `text`.
    fn redact(&self, text: &str) -> String {
        self.redact_with_counts(text).0
    }
}
