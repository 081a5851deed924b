//! Export parsing - turns a rule export into the uniform rule table.
//!
//! Two export families are supported:
//! - `.txt` free-text dumps, one `Key: value` line per field (see `text`)
//! - `.tsv` / `.csv` delimited tables with a header row (see `tabular`)
//!
//! Both produce the same `Vec<Rule>` with normalized tests. Tests that fail
//! normalization are dropped and reported as `ParseWarning`s.

mod tabular;
mod text;

pub use tabular::parse_delimited;
pub use text::parse_text;

use crate::error::{AuditError, Result};
use crate::types::Rule;
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::Path;

/// Export family, selected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Delimited(u8),
}

impl InputFormat {
    /// Pick the format for `path`, or None if the extension is not recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(InputFormat::Text),
            "tsv" => Some(InputFormat::Delimited(b'\t')),
            "csv" => Some(InputFormat::Delimited(b',')),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Text => "txt",
            InputFormat::Delimited(b'\t') => "tsv",
            InputFormat::Delimited(_) => "csv",
        }
    }
}

/// Why a line of the export was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A test that could not be normalized
    MalformedTest,
    /// A line read before any `Rule Name` line
    OutsideRule,
}

/// An export line that was dropped instead of landing in the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub kind: WarningKind,
    /// Name of the rule owning the line, if a rule had been started
    pub rule: Option<String>,
    /// 1-based line in the export
    pub line: u64,
    pub text: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::MalformedTest => write!(
                f,
                "Rule: {} has a weird test in line {}: {:?}",
                self.rule.as_deref().unwrap_or("<no rule>"),
                self.line,
                self.text
            ),
            WarningKind::OutsideRule => {
                write!(f, "Ignoring line {} outside of any rule: {:?}", self.line, self.text)
            }
        }
    }
}

impl ParseWarning {
    pub(crate) fn malformed_test(rule: Option<&str>, line: u64, text: &str) -> Self {
        Self::logged(WarningKind::MalformedTest, rule, line, text)
    }

    pub(crate) fn outside_rule(line: u64, text: &str) -> Self {
        Self::logged(WarningKind::OutsideRule, None, line, text)
    }

    fn logged(kind: WarningKind, rule: Option<&str>, line: u64, text: &str) -> Self {
        let warning = Self { kind, rule: rule.map(str::to_string), line, text: text.trim().to_string() };
        warn!("{}", warning);
        warning
    }

    pub fn is_malformed_test(&self) -> bool {
        self.kind == WarningKind::MalformedTest
    }
}

/// Rule table recovered from one export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedExport {
    pub rules: Vec<Rule>,
    pub warnings: Vec<ParseWarning>,
}

/// Read and parse an export, routing on its extension.
///
/// `progress` is called with `(done, total)` as lines or rows are consumed.
pub fn read_rules_from_file<F>(path: &Path, progress: F) -> Result<ParsedExport>
where
    F: FnMut(usize, usize),
{
    let format =
        InputFormat::from_path(path).ok_or_else(|| AuditError::UnrecognizedFormat { path: path.to_path_buf() })?;

    debug!("Reading {} export {:?}", format.as_str(), path);
    let content = fs::read_to_string(path)?;

    let parsed = match format {
        InputFormat::Text => parse_text(&content, progress)?,
        InputFormat::Delimited(delimiter) => parse_delimited(content.as_bytes(), delimiter, progress)?,
    };

    debug!("Parsed {} rules ({} lines dropped)", parsed.rules.len(), parsed.warnings.len());
    Ok(parsed)
}
