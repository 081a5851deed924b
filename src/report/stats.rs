//! Report construction from the aggregated rule table.
//!
//! This module derives the reference-set report, the test-statistics
//! report and the run summary. It only reads; writers live in `export`.

use super::types::{AuditSummary, ReferenceSetRow, TestStatRow};
use crate::aggregate::TestAggregator;
use crate::types::Rule;

/// Rules that write into a reference set, with their test counts.
///
/// # Arguments
/// * `rules` - The filtered, aggregated rule table
pub fn build_reference_set_report(rules: &[Rule]) -> Vec<ReferenceSetRow> {
    rules
        .iter()
        .filter_map(|rule| {
            let target = rule.reference_set_target.as_ref()?;
            Some(ReferenceSetRow {
                name: rule.name.clone(),
                test_count: rule.test_count(),
                enabled: rule.enabled,
                tests: rule.tests.clone(),
                reference_set_target: target.clone(),
            })
        })
        .collect()
}

/// Test statistics as a table, in order of first appearance.
pub fn build_test_stats_report(aggregator: &TestAggregator) -> Vec<TestStatRow> {
    aggregator.iter().map(|(test, stat)| TestStatRow { test: test.to_string(), stat: stat.clone() }).collect()
}

/// Summarize one audit run.
///
/// # Arguments
/// * `rules` - The filtered, aggregated rule table
/// * `aggregator` - Statistics gathered over `rules`
/// * `malformed_tests` - Number of tests dropped while parsing
pub fn summarize_audit(rules: &[Rule], aggregator: &TestAggregator, malformed_tests: usize) -> AuditSummary {
    let building_blocks = rules.iter().filter(|r| r.is_building_block).count();
    let enabled = rules.iter().filter(|r| r.enabled).count();

    AuditSummary {
        rules: rules.len(),
        building_blocks,
        enabled,
        disabled: rules.len() - enabled,
        reference_set_rules: rules.iter().filter(|r| r.writes_reference_set()).count(),
        distinct_tests: aggregator.len(),
        malformed_tests,
        tests_by_type: aggregator.counts_by_type(),
    }
}
