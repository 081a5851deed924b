//! Delimited-table export parser (`.tsv` / `.csv`).
//!
//! Columns are matched by header name. The `Tests` cell holds the raw test
//! lines joined with `\n` plus one stray trailing character left over from
//! the exporter's quoting, which is dropped before splitting.

use super::{ParseWarning, ParsedExport};
use crate::error::{AuditError, REQUIRED_COLUMNS, Result};
use crate::normalize::normalize_test;
use crate::types::Rule;
use log::debug;
use std::io::Read;

/// Positions of the schema columns within a header row
struct ColumnIndex {
    name: usize,
    enabled: usize,
    building_block: usize,
    owner: usize,
    response_limiter: usize,
    reference_set: usize,
    tests: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| AuditError::MissingColumn { column: column.to_string() })
        };

        Ok(Self {
            name: find(REQUIRED_COLUMNS[0])?,
            enabled: find(REQUIRED_COLUMNS[1])?,
            building_block: find(REQUIRED_COLUMNS[2])?,
            owner: find(REQUIRED_COLUMNS[3])?,
            response_limiter: find(REQUIRED_COLUMNS[4])?,
            reference_set: find(REQUIRED_COLUMNS[5])?,
            tests: find(REQUIRED_COLUMNS[6])?,
        })
    }

    fn is_schema_column(&self, i: usize) -> bool {
        [self.name, self.enabled, self.building_block, self.owner, self.response_limiter, self.reference_set, self.tests]
            .contains(&i)
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn optional_cell(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "None" { None } else { Some(value.to_string()) }
}

/// Drop the stray trailing character of a `Tests` cell and split it into raw lines
fn split_tests_cell(cell: &str) -> Vec<&str> {
    let mut chars = cell.chars();
    chars.next_back();
    let body = chars.as_str();
    if body.is_empty() { Vec::new() } else { body.split('\n').collect() }
}

/// Parse a delimited export with a header row.
pub fn parse_delimited<R, F>(reader: R, delimiter: u8, mut progress: F) -> Result<ParsedExport>
where
    R: Read,
    F: FnMut(usize, usize),
{
    let mut reader = csv::ReaderBuilder::new().delimiter(delimiter).has_headers(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    debug!("Read {} rows with {} columns", records.len(), headers.len());

    let total = records.len();
    let mut output = ParsedExport::default();

    for (i, record) in records.iter().enumerate() {
        let cell = |col: usize| record.get(col).unwrap_or_default();
        let name = cell(columns.name).to_string();
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 2);

        let mut tests = Vec::new();
        for raw in split_tests_cell(cell(columns.tests)) {
            match normalize_test(raw) {
                Ok(test) => tests.push(test),
                Err(malformed) => {
                    output.warnings.push(ParseWarning::malformed_test(Some(name.as_str()), line, &malformed.line))
                }
            }
        }

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(col, _)| !columns.is_schema_column(*col))
            .map(|(col, header)| (header.to_string(), cell(col).to_string()))
            .collect();

        output.rules.push(Rule {
            name,
            enabled: parse_flag(cell(columns.enabled)),
            is_building_block: parse_flag(cell(columns.building_block)),
            owner: cell(columns.owner).to_string(),
            response_limiter: optional_cell(cell(columns.response_limiter)),
            reference_set_target: optional_cell(cell(columns.reference_set)),
            tests,
            extra,
        });

        progress(i + 1, total);
    }

    Ok(output)
}
