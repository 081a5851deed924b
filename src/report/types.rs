//! Report row types.
//!
//! These are the tables handed to writers: the reference-set report, the
//! test-statistics report and the run summary shown on the console.

use crate::types::{TestStat, TestType};
use std::collections::BTreeMap;

/// A rule that writes matches into a reference set
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReferenceSetRow {
    pub name: String,
    pub test_count: usize,
    pub enabled: bool,
    pub tests: Vec<String>,
    pub reference_set_target: String,
}

/// One row of the test-statistics report, keyed by normalized test
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TestStatRow {
    pub test: String,
    #[serde(flatten)]
    pub stat: TestStat,
}

/// Totals for one audit run
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct AuditSummary {
    pub rules: usize,
    pub building_blocks: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub reference_set_rules: usize,
    pub distinct_tests: usize,
    pub malformed_tests: usize,
    pub tests_by_type: BTreeMap<TestType, usize>,
}

impl AuditSummary {
    /// Rows for the console summary table, in display order
    pub fn table_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Rules analyzed".to_string(), self.rules.to_string()),
            ("  Building blocks".to_string(), self.building_blocks.to_string()),
            ("  Enabled".to_string(), self.enabled.to_string()),
            ("  Disabled".to_string(), self.disabled.to_string()),
            ("Writing to reference sets".to_string(), self.reference_set_rules.to_string()),
            ("Distinct tests".to_string(), self.distinct_tests.to_string()),
        ];
        for kind in TestType::all() {
            let count = self.tests_by_type.get(&kind).copied().unwrap_or(0);
            rows.push((format!("  {}", kind.display_name()), count.to_string()));
        }
        rows.push(("Malformed tests dropped".to_string(), self.malformed_tests.to_string()));
        rows
    }
}
