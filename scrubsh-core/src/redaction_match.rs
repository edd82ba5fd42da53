// scrubsh-core/src/redaction_match.rs
//! Reporting types for redaction passes, and helpers for logging redaction
//! events without leaking the values being redacted.

use log::debug;
use std::collections::BTreeMap;
use std::ops::AddAssign;

use crate::config::RedactionKind;

/// Number of replacements made by each pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionCounts {
    counts: BTreeMap<RedactionKind, usize>,
}

impl RedactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: RedactionKind, occurrences: usize) {
        if occurrences > 0 {
            *self.counts.entry(kind).or_insert(0) += occurrences;
        }
    }

    pub fn get(&self, kind: RedactionKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// One summary line per pass that fired, in pass order.
    pub fn summary(&self) -> Vec<RedactionSummaryItem> {
        self.counts
            .iter()
            .map(|(&kind, &occurrences)| RedactionSummaryItem { kind, occurrences })
            .collect()
    }
}

impl AddAssign<&RedactionCounts> for RedactionCounts {
    fn add_assign(&mut self, other: &RedactionCounts) {
        for (&kind, &occurrences) in &other.counts {
            self.record(kind, occurrences);
        }
    }
}

/// A single item in the redaction summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionSummaryItem {
    pub kind: RedactionKind,
    pub occurrences: usize,
}

/// Masks a sensitive value for log output.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

pub fn log_redaction_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    sanitized_replacement: &str,
    kind: RedactionKind,
) {
    debug!(
        "{} Redaction action: Original='{}', Redacted='{}' for pass '{}'",
        module_path,
        redact_sensitive(original_sensitive_content),
        sanitized_replacement,
        kind
    );
}
