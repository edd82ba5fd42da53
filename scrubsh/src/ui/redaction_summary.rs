//! Prints the per-pass redaction summary after a run.

use owo_colors::AnsiColors;
use scrubsh_core::ScrubReport;
use std::io::{self, Write};

use crate::ui::output_format::paint;

pub fn print_summary<W: Write>(
    report: &ScrubReport,
    writer: &mut W,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("--- Redaction Summary ---", AnsiColors::Yellow, enable_colors))?;

    if report.counts.is_empty() {
        writeln!(writer, "No redactions applied.")?;
    } else {
        for item in report.counts.summary() {
            writeln!(
                writer,
                "{} ({} occurrences)",
                paint(item.kind.name(), AnsiColors::Magenta, enable_colors),
                item.occurrences
            )?;
        }
    }

    writeln!(writer, "{} unit(s) processed.", report.units)?;
    writeln!(writer, "{}", paint("-------------------------", AnsiColors::Yellow, enable_colors))
}
