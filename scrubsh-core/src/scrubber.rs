// scrubsh-core/src/scrubber.rs
//! Applies a `RedactionEngine` to every unit of a stream.
//!
//! A unit is one line in line mode, or one field of a row in CSV mode. Units
//! are read, redacted and written one at a time; nothing is buffered beyond
//! the current unit, and the number of units written always equals the
//! number read.
//!
//! Lines are read as bytes. A line that is not valid UTF-8 is treated as
//! Latin-1 and written back in the same encoding, so bytes the passes do not
//! touch come out unchanged.
//!
//! License: MIT OR APACHE 2.0

use csv::{StringRecord, Terminator};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::io::{BufRead, BufWriter, Write};

use crate::config::ExemptionSet;
use crate::engine::RedactionEngine;
use crate::errors::ScrubError;
use crate::redaction_match::{redact_sensitive, RedactionCounts};

static EMBEDDED_LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+").expect("line break pattern is valid"));

const BYTE_ORDER_MARK: char = '\u{feff}';

/// How the raw bytes of a line were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEncoding {
    Utf8,
    Latin1,
}

impl LineEncoding {
    /// Turns text produced from a line of this encoding back into bytes.
    fn encode<'t>(self, text: &'t str) -> Cow<'t, [u8]> {
        match self {
            LineEncoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            LineEncoding::Latin1 => {
                let mut bytes = Vec::with_capacity(text.len());
                for c in text.chars() {
                    match u8::try_from(c) {
                        Ok(byte) => bytes.push(byte),
                        // Only an engine that invents non-Latin-1 text gets here.
                        Err(_) => bytes.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
                    }
                }
                Cow::Owned(bytes)
            }
        }
    }
}

/// How the input stream is broken into units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrubMode {
    /// Every line is one unit.
    Lines,
    /// Every line is one CSV row; each field not in the set is one unit.
    Csv(ExemptionSet),
}

/// What a completed scrub did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrubReport {
    /// Lines (line mode) or rows (CSV mode) written.
    pub units: usize,
    /// CSV fields written, exempt ones included. Zero in line mode.
    pub fields: usize,
    pub counts: RedactionCounts,
}

/// Drives a redaction engine over a line-oriented or CSV input.
#[derive(Debug, Clone)]
pub struct RecordScrubber<E: RedactionEngine> {
    engine: E,
    mode: ScrubMode,
}

impl<E: RedactionEngine> RecordScrubber<E> {
    pub fn new(engine: E, mode: ScrubMode) -> Self {
        Self { engine, mode }
    }

    pub fn lines(engine: E) -> Self {
        Self::new(engine, ScrubMode::Lines)
    }

    pub fn csv(engine: E, exemptions: ExemptionSet) -> Self {
        Self::new(engine, ScrubMode::Csv(exemptions))
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn mode(&self) -> &ScrubMode {
        &self.mode
    }

    /// Reads every unit from `input`, redacts it and writes it to `output`.
    ///
    /// The output is flushed before returning. On error, whatever was written
    /// before the failing unit stays written.
    pub fn scrub<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<ScrubReport, ScrubError> {
        let report = match &self.mode {
            ScrubMode::Lines => self.scrub_lines(input, output)?,
            ScrubMode::Csv(exemptions) => self.scrub_csv(input, output, exemptions)?,
        };
        info!(
            "Scrubbed {} unit(s), {} redaction(s).",
            report.units,
            report.counts.total()
        );
        Ok(report)
    }

    fn scrub_lines<R: BufRead, W: Write>(
        &self,
        mut input: R,
        output: W,
    ) -> Result<ScrubReport, ScrubError> {
        let mut output = BufWriter::new(output);
        let mut report = ScrubReport::default();
        let mut raw = Vec::new();

        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let (line, encoding) = decode_line(trim_line_ending(&raw));
            let (redacted, counts) = self.engine.redact_with_counts(&line);
            output.write_all(&encoding.encode(&redacted))?;
            output.write_all(b"\n")?;

            report.units += 1;
            report.counts += &counts;
        }

        output.flush()?;
        Ok(report)
    }

    fn scrub_csv<R: BufRead, W: Write>(
        &self,
        mut input: R,
        output: W,
        exemptions: &ExemptionSet,
    ) -> Result<ScrubReport, ScrubError> {
        let mut output = BufWriter::new(output);
        let mut report = ScrubReport::default();
        let mut raw = Vec::new();
        let mut row_buffer = Vec::new();

        loop {
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            report.units += 1;

            let (decoded, encoding) = decode_line(&raw);
            let line = normalize_line(&decoded);
            if line.is_empty() {
                // A CSV writer cannot express a zero-field row; keep the blank line.
                output.write_all(b"\n")?;
                continue;
            }

            // The CSV reader drops a leading byte order mark, so carry it
            // around the tokenizer and put it back on the first field.
            let (has_bom, body) = match line.strip_prefix(BYTE_ORDER_MARK) {
                Some(rest) => (true, rest),
                None => (false, &*line),
            };
            let record = parse_row(body)?;
            let (mut fields, counts) = self.scrub_row(&record, exemptions, report.units);
            if has_bom {
                match fields.first_mut() {
                    Some(first) => first.insert(0, BYTE_ORDER_MARK),
                    None => fields.push(BYTE_ORDER_MARK.to_string()),
                }
            }

            write_row(&mut row_buffer, &fields)?;
            let row = String::from_utf8_lossy(&row_buffer);
            output.write_all(&encoding.encode(&row))?;

            report.fields += fields.len();
            report.counts += &counts;
        }

        output.flush()?;
        Ok(report)
    }

    /// Redacts every field whose index is not exempt; exempt fields are
    /// copied verbatim.
    pub fn scrub_row(
        &self,
        record: &StringRecord,
        exemptions: &ExemptionSet,
        row_number: usize,
    ) -> (Vec<String>, RedactionCounts) {
        let mut counts = RedactionCounts::new();
        let fields = record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                if exemptions.contains(index) {
                    return field.to_string();
                }
                let (redacted, field_counts) = self.engine.redact_with_counts(field);
                if !field_counts.is_empty() {
                    debug!(
                        "Row {} column {}: {} -> '{}'",
                        row_number,
                        index + 1,
                        redact_sensitive(field),
                        redacted
                    );
                }
                counts += &field_counts;
                redacted
            })
            .collect();
        (fields, counts)
    }
}

fn trim_line_ending(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|b| !matches!(b, b'\r' | b'\n'))
        .map_or(0, |last| last + 1);
    &raw[..end]
}

/// Decodes a line as UTF-8, falling back to Latin-1 so every byte maps to
/// exactly one character.
fn decode_line(raw: &[u8]) -> (Cow<'_, str>, LineEncoding) {
    match std::str::from_utf8(raw) {
        Ok(text) => (Cow::Borrowed(text), LineEncoding::Utf8),
        Err(_) => (
            Cow::Owned(raw.iter().map(|&byte| char::from(byte)).collect()),
            LineEncoding::Latin1,
        ),
    }
}

/// Strips the line terminator and collapses any remaining carriage returns
/// or line feeds into a single space each run.
fn normalize_line(raw: &str) -> Cow<'_, str> {
    EMBEDDED_LINE_BREAKS.replace_all(raw.trim_end_matches(['\r', '\n']), " ")
}

/// Tokenizes a single physical line as one CSV row.
fn parse_row(line: &str) -> Result<StringRecord, ScrubError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Serializes one row, terminator included, into `buffer`.
fn write_row(buffer: &mut Vec<u8>, fields: &[String]) -> Result<(), ScrubError> {
    buffer.clear();
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut *buffer);
    writer.write_record(fields)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::regex_engine::RegexEngine;

    /// Upper-cases its input, so tests can see exactly which units were touched.
    struct ShoutingEngine;

    impl RedactionEngine for ShoutingEngine {
        fn redact_with_counts(&self, text: &str) -> (String, RedactionCounts) {
            (text.to_uppercase(), RedactionCounts::new())
        }
    }

    fn run<E: RedactionEngine>(scrubber: &RecordScrubber<E>, input: &str) -> (String, ScrubReport) {
        let mut out = Vec::new();
        let report = scrubber.scrub(input.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    fn run_bytes<E: RedactionEngine>(scrubber: &RecordScrubber<E>, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        scrubber.scrub(input, &mut out).unwrap();
        out
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(trim_line_ending(b"abc \n"), b"abc ");
        assert_eq!(trim_line_ending(b"\r\n"), b"");
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("a,b\r\n"), "a,b");
        assert_eq!(normalize_line("a\rb,c\n"), "a b,c");
        assert_eq!(normalize_line("a\r\r,b"), "a ,b");
        assert_eq!(normalize_line("\n"), "");
    }

    #[test]
    fn test_lines_mode_normalizes_terminators() {
        let scrubber = RecordScrubber::lines(ShoutingEngine);
        let (out, report) = run(&scrubber, "one\r\ntwo\nthree");
        assert_eq!(out, "ONE\nTWO\nTHREE\n");
        assert_eq!(report.units, 3);
        assert_eq!(report.fields, 0);
    }

    #[test]
    fn test_lines_mode_empty_input() {
        let scrubber = RecordScrubber::lines(ShoutingEngine);
        let (out, report) = run(&scrubber, "");
        assert_eq!(out, "");
        assert_eq!(report.units, 0);
    }

    #[test]
    fn test_csv_exempt_columns_are_verbatim() {
        let scrubber = RecordScrubber::csv(ShoutingEngine, ExemptionSet::from_zero_based([0, 2]));
        let (out, report) = run(&scrubber, "a,b,c,d\nx,y\n");
        assert_eq!(out, "a,B,c,D\nx,Y\n");
        assert_eq!(report.units, 2);
        assert_eq!(report.fields, 6);
    }

    #[test]
    fn test_csv_quoting_round_trips() {
        let scrubber = RecordScrubber::csv(ShoutingEngine, ExemptionSet::new());
        let (out, _) = run(&scrubber, "\"hello, world\",\"say \"\"hi\"\"\",plain\n");
        assert_eq!(out, "\"HELLO, WORLD\",\"SAY \"\"HI\"\"\",PLAIN\n");
    }

    #[test]
    fn test_csv_blank_line_is_kept() {
        let scrubber = RecordScrubber::csv(ShoutingEngine, ExemptionSet::new());
        let (out, report) = run(&scrubber, "a,b\n\nc\n");
        assert_eq!(out, "A,B\n\nC\n");
        assert_eq!(report.units, 3);
    }

    #[test]
    fn test_csv_embedded_carriage_return_becomes_space() {
        let scrubber = RecordScrubber::csv(ShoutingEngine, ExemptionSet::new());
        let (out, report) = run(&scrubber, "a\rb,c\r\n");
        assert_eq!(out, "A B,C\n");
        assert_eq!(report.units, 1);
    }

    #[test]
    fn test_csv_counts_redactions() {
        let scrubber = RecordScrubber::csv(RegexEngine::new().unwrap(), ExemptionSet::new());
        let (out, report) = run(&scrubber, "94025,650-327-7398,plain\n");
        assert_eq!(out, "<zipRedac>,<phoneRedac>,plain\n");
        assert_eq!(report.counts.total(), 2);
    }

    #[test]
    fn test_csv_byte_order_mark_kept_on_exempt_column() {
        let scrubber =
            RecordScrubber::csv(RegexEngine::new().unwrap(), ExemptionSet::from_zero_based([0]));
        let (out, report) = run(&scrubber, "\u{feff}a,94025\nb,c\n");
        assert_eq!(out, "\u{feff}a,<zipRedac>\nb,c\n");
        assert_eq!(report.units, 2);
    }

    #[test]
    fn test_csv_byte_order_mark_restored_after_redaction() {
        let scrubber = RecordScrubber::csv(ShoutingEngine, ExemptionSet::new());
        let (out, _) = run(&scrubber, "\u{feff}a,b\n");
        assert_eq!(out, "\u{feff}A,B\n");
    }

    #[test]
    fn test_lines_mode_passes_latin1_bytes_through() {
        let scrubber = RecordScrubber::lines(RegexEngine::new().unwrap());
        let out = run_bytes(&scrubber, b"Caf\xe9 call 650-327-7398\nplain\n");
        assert_eq!(out, b"Caf\xe9 call <phoneRedac>\nplain\n".to_vec());
    }

    #[test]
    fn test_csv_latin1_exempt_field_is_byte_identical() {
        let scrubber =
            RecordScrubber::csv(RegexEngine::new().unwrap(), ExemptionSet::from_zero_based([0]));
        let out = run_bytes(&scrubber, b"M\xfcller 94025,94025\n");
        assert_eq!(out, b"M\xfcller 94025,<zipRedac>\n".to_vec());
    }
}
