//! Pattern compilation for the scrubsh redaction engine.
//!
//! This module turns the built-in pass definitions (phone, ZIP, email, name)
//! into an ordered list of compiled patterns. Order matters: each pass sees
//! the output of the passes before it.

pub mod compiler;
