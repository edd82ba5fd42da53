//! Subcommand implementations.

pub mod scrub;
