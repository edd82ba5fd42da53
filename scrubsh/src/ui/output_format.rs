//! Formatting of one-line diagnostics written to stderr.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

/// Colours `text` when `enable_colors` is set, otherwise returns it as is.
pub fn paint(text: &str, color: AnsiColors, enable_colors: bool) -> String {
    if enable_colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    msg: &str,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(msg, AnsiColors::Cyan, enable_colors))
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    msg: &str,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{} {}", paint("Error:", AnsiColors::Red, enable_colors), msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_has_no_escapes() {
        let mut buf = Vec::new();
        print_error_message(&mut buf, "bad column", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: bad column\n");
    }

    #[test]
    fn test_colored_output_wraps_text() {
        let painted = paint("hi", AnsiColors::Red, true);
        assert!(painted.contains("hi"));
        assert!(painted.starts_with("\u{1b}["));
    }
}
