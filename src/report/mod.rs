//! Report generation module - derived tables and their writers.
//!
//! This module handles:
//! - Building the reference-set and test-statistics reports
//! - Summarizing an audit run
//! - Export to TSV, readable text and JSON
//! - Console summary tables
//!
//! # Module Organization
//!
//! - `types` - Report row types (ReferenceSetRow, TestStatRow, AuditSummary)
//! - `stats` - Report construction from the aggregated rule table
//! - `export` - File writers
//! - `table` - Console table output

mod export;
mod stats;
mod table;
mod types;

pub use types::{AuditSummary, ReferenceSetRow, TestStatRow};

pub use stats::{build_reference_set_report, build_test_stats_report, summarize_audit};

pub use export::{export_json_report, export_readable_rules, export_test_stats_tsv};

pub use table::print_summary;
