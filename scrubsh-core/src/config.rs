//! Configuration management for `scrubsh-core`.
//!
//! This module defines the redaction pass kinds and their placeholders, the
//! column exemption set used in CSV mode, the engine options, and the YAML
//! scrub configuration that the CLI layers its flags on top of.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::ScrubError;

pub const PHONE_PLACEHOLDER: &str = "<phoneRedac>";
pub const ZIP_PLACEHOLDER: &str = "<zipRedac>";
pub const EMAIL_PLACEHOLDER: &str = "<emailRedac>";
/// Reserved for the name pass, which never emits it.
pub const NAME_PLACEHOLDER: &str = "<nameRedac>";

/// 0-based columns exempted by default in the legacy CSV anonymizer.
pub const LEGACY_EXEMPT_COLUMNS: [usize; 2] = [1, 2];

/// The kind of personally identifying information a redaction pass targets.
///
/// The declaration order is the order in which passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionKind {
    Phone,
    Zip,
    Email,
    Name,
}

impl RedactionKind {
    /// All kinds, in application order.
    pub const ALL: [RedactionKind; 4] = [
        RedactionKind::Phone,
        RedactionKind::Zip,
        RedactionKind::Email,
        RedactionKind::Name,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RedactionKind::Phone => "phone",
            RedactionKind::Zip => "zip",
            RedactionKind::Email => "email",
            RedactionKind::Name => "name",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            RedactionKind::Phone => PHONE_PLACEHOLDER,
            RedactionKind::Zip => ZIP_PLACEHOLDER,
            RedactionKind::Email => EMAIL_PLACEHOLDER,
            RedactionKind::Name => NAME_PLACEHOLDER,
        }
    }
}

impl fmt::Display for RedactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RedactionKind {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RedactionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScrubError::UnknownPass(wanted.to_string()))
    }
}

/// Converts a user-facing column number (origin 1) into a column index (origin 0).
fn one_based_to_index(column: usize, spec: &str) -> Result<usize, ScrubError> {
    column
        .checked_sub(1)
        .ok_or_else(|| ScrubError::InvalidColumn(spec.to_string()))
}

/// Parses a column specifier as typed by a user and returns its index (origin 0).
fn parse_column_specifier(spec: &str) -> Result<usize, ScrubError> {
    let column: usize = spec
        .trim()
        .parse()
        .map_err(|_| ScrubError::InvalidColumn(spec.to_string()))?;
    one_based_to_index(column, spec)
}

/// The set of CSV column indices (origin 0) that are copied verbatim instead
/// of being passed through the redaction engine. Empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionSet {
    columns: BTreeSet<usize>,
}

impl ExemptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_zero_based<I: IntoIterator<Item = usize>>(columns: I) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Parses column specifiers as typed by a user (origin 1).
    ///
    /// Anything that is not a positive integer is rejected with
    /// [`ScrubError::InvalidColumn`].
    pub fn from_one_based<S: AsRef<str>>(specs: &[S]) -> Result<Self, ScrubError> {
        let columns = specs
            .iter()
            .map(|spec| parse_column_specifier(spec.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { columns })
    }

    /// The legacy default of exempting columns 1 and 2 (origin 0).
    /// Only used when explicitly requested.
    pub fn legacy() -> Self {
        Self::from_zero_based(LEGACY_EXEMPT_COLUMNS)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.columns.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    pub fn union_with(&mut self, other: &ExemptionSet) {
        self.columns.extend(other.columns.iter().copied());
    }
}

/// Options controlling which redaction passes an engine runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub disabled_passes: HashSet<RedactionKind>,
}

impl EngineOptions {
    pub fn is_enabled(&self, kind: RedactionKind) -> bool {
        !self.disabled_passes.contains(&kind)
    }
}

/// Top-level scrub configuration, as read from a YAML file.
///
/// ```yaml
/// ignore_columns: [1, 3]     # origin 1
/// disabled_passes: [zip]
/// legacy_columns: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrubConfig {
    /// CSV columns (origin 1) to copy verbatim.
    pub ignore_columns: Vec<usize>,
    /// Names of redaction passes to skip.
    pub disabled_passes: Vec<String>,
    /// Also exempt the legacy default columns.
    pub legacy_columns: bool,
}

impl ScrubConfig {
    /// Loads and validates a scrub configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading scrub configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(
            "Loaded config: {} ignored column(s), {} disabled pass(es).",
            config.ignore_columns.len(),
            config.disabled_passes.len()
        );
        Ok(config)
    }

    /// Parses and validates a scrub configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ScrubError> {
        // An empty document deserializes to unit, not to a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ScrubConfig = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every column number and pass name without building anything.
    pub fn validate(&self) -> Result<(), ScrubError> {
        self.exemption_set()?;
        self.engine_options()?;
        Ok(())
    }

    /// Layers command-line values on top of this configuration.
    ///
    /// Columns and disabled passes are unioned; the legacy flag is sticky.
    pub fn merge_cli<S: AsRef<str>>(
        mut self,
        ignore_columns: &[S],
        disabled_passes: &[S],
        legacy_columns: bool,
    ) -> Result<Self, ScrubError> {
        for spec in ignore_columns {
            let column = parse_column_specifier(spec.as_ref())? + 1;
            if !self.ignore_columns.contains(&column) {
                self.ignore_columns.push(column);
            }
        }
        for pass in disabled_passes {
            let pass = pass.as_ref().trim().to_string();
            if !self.disabled_passes.contains(&pass) {
                self.disabled_passes.push(pass);
            }
        }
        self.legacy_columns |= legacy_columns;
        self.validate()?;
        debug!("Config after merging CLI values: {:?}", self);
        Ok(self)
    }

    /// Builds the 0-based exemption set described by this configuration.
    pub fn exemption_set(&self) -> Result<ExemptionSet, ScrubError> {
        let mut set = ExemptionSet::new();
        for &column in &self.ignore_columns {
            let index = one_based_to_index(column, &column.to_string())?;
            set.columns.insert(index);
        }
        if self.legacy_columns {
            set.union_with(&ExemptionSet::legacy());
        }
        Ok(set)
    }

    /// Builds the engine options described by this configuration.
    pub fn engine_options(&self) -> Result<EngineOptions, ScrubError> {
        let disabled_passes = self
            .disabled_passes
            .iter()
            .map(|name| name.parse::<RedactionKind>())
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(EngineOptions { disabled_passes })
    }
}
