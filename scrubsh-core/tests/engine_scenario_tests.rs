//! Scenario tests for the redaction engine, including the documented partial
//! matches on international phone numbers.

use anyhow::Result;
use scrubsh_core::{RedactionEngine, RedactionKind, RegexEngine};
use test_log::test;

fn engine() -> RegexEngine {
    RegexEngine::new().expect("default patterns compile")
}

#[test]
fn test_text_scenarios() {
    let cases = [
        ("First line", "First line"),
        ("A zipcode is 94025", "A zipcode is <zipRedac>"),
        ("A zip+4 is 94025-3412", "A zip+4 is <zipRedac>"),
        ("A US phone number is 650-327-7398", "A US phone number is <phoneRedac>"),
        (
            "A German phone number is 049-721-1234567",
            "A German phone number is 049-<phoneRedac>567",
        ),
        (
            "An Indian phone number is 011-91-1234567890",
            "An Indian phone number is 011-91-1<phoneRedac>90",
        ),
        ("An email address foo@gmail.com", "An email address <emailRedac> "),
    ];

    let engine = engine();
    for (input, expected) in cases {
        assert_eq!(engine.redact(input), expected, "input: {input:?}");
    }
}

#[test]
fn test_placeholders_survive_a_second_run() {
    let engine = engine();
    let already = "A US phone number is <phoneRedac>, zip <zipRedac>, mail <emailRedac> ";
    let (out, counts) = engine.redact_with_counts(already);
    assert_eq!(out, already);
    assert!(counts.is_empty());

    for input in [
        "A German phone number is 049-721-1234567",
        "A zip+4 is 94025-3412",
        "An email address foo@gmail.com",
        "last 650-327-7398 column",
    ] {
        let once = engine.redact(input);
        assert_eq!(engine.redact(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_zip_inside_phone_is_not_matched_twice() -> Result<()> {
    let (out, counts) = engine().redact_with_counts("call 650-327-7398");
    assert_eq!(out, "call <phoneRedac>");
    assert_eq!(counts.get(RedactionKind::Phone), 1);
    assert_eq!(counts.get(RedactionKind::Zip), 0);
    Ok(())
}

#[test]
fn test_email_trailing_text_is_kept() {
    assert_eq!(
        engine().redact("write to john.doe@stanford.edu for details"),
        "write to <emailRedac> for details"
    );
}

#[test]
fn test_name_pass_never_changes_text() {
    let (out, counts) = engine().redact_with_counts("Mark Bill and Grace Will");
    assert_eq!(out, "Mark Bill and Grace Will");
    assert_eq!(counts.get(RedactionKind::Name), 0);
}
