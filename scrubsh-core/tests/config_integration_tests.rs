use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use scrubsh_core::config::{RedactionKind, ScrubConfig};

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
ignore_columns: [1, 3]
disabled_passes: [zip]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = ScrubConfig::load_from_file(file.path())?;
    assert_eq!(config.ignore_columns, vec![1, 3]);
    assert!(!config.legacy_columns);

    let set = config.exemption_set()?;
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2]);
    assert!(!config.engine_options()?.is_enabled(RedactionKind::Zip));
    Ok(())
}

#[test]
fn test_legacy_columns_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"legacy_columns: true\nignore_columns: [1]\n")?;
    let set = ScrubConfig::load_from_file(file.path())?.exemption_set()?;
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    Ok(())
}

#[test]
fn test_unknown_field_is_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"ignore_cols: [1]\n")?;
    assert!(ScrubConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_non_integer_column_is_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"ignore_columns: [one]\n")?;
    let err = ScrubConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config file"));
    Ok(())
}

#[test]
fn test_unknown_pass_is_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"disabled_passes: [ssn]\n")?;
    let err = ScrubConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Unknown redaction pass 'ssn'"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(ScrubConfig::load_from_file("/definitely/not/here.yaml").is_err());
}
