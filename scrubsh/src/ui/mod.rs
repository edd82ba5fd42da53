//! Terminal output helpers: diagnostics and the redaction summary.

pub mod output_format;
pub mod redaction_summary;
