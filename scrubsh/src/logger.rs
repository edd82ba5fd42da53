//! Logger setup for the scrubsh binary.
//!
//! The level comes from command-line flags only; `RUST_LOG` is not read.

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Installs the global logger, writing to stderr. Calling it twice is harmless.
pub fn init_logger(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(Target::Stderr)
        .try_init();
}

/// Maps the `--quiet` / `--debug` flags to a level. Quiet wins.
pub fn level_from_flags(quiet: bool, debug: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), LevelFilter::Off);
        assert_eq!(level_from_flags(false, true), LevelFilter::Debug);
        assert_eq!(level_from_flags(false, false), LevelFilter::Warn);
    }
}
