/// Error types for the audit pipeline
///
/// Malformed tests are not represented here: they are recovered locally by
/// the parsers (see `normalize::MalformedTest`). Everything in `AuditError`
/// aborts the run before any output file is written.
use std::path::PathBuf;
use thiserror::Error;

/// Columns a tabular export must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Rule Name",
    "Enabled",
    "Building Block",
    "Owner",
    "Response Limiter",
    "RESP: Add to Reference Set",
    "Tests",
];

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("unrecognized export format for {}: expected a .txt, .tsv or .csv file", .path.display())]
    UnrecognizedFormat { path: PathBuf },

    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("rule '{rule}' has no '{field}' field")]
    MissingField { rule: String, field: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("delimited file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuditError {
    /// Errors caused by an export that doesn't match the rule schema
    pub fn is_schema_error(&self) -> bool {
        matches!(self, AuditError::MissingColumn { .. } | AuditError::MissingField { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
