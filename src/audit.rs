/// Audit pipeline
///
/// export -> parser -> filter -> aggregator -> reports. The whole export is
/// read and processed in memory before anything is returned.
use crate::aggregate::TestAggregator;
use crate::error::Result;
use crate::filter::RuleFilter;
use crate::parser::{self, ParseWarning};
use crate::report::{
    AuditSummary, ReferenceSetRow, TestStatRow, build_reference_set_report, build_test_stats_report, summarize_audit,
};
use crate::types::Rule;
use log::{debug, info};
use std::path::Path;

/// Everything one successful audit produces
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuditOutcome {
    pub reference_set_report: Vec<ReferenceSetRow>,
    pub test_stats: Vec<TestStatRow>,
    /// The filtered and aggregated rule table
    pub rules: Vec<Rule>,
    pub summary: AuditSummary,
}

/// One pass over an export: the parse warnings, and the reports if any rule matched
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub warnings: Vec<ParseWarning>,
    pub outcome: Option<AuditOutcome>,
}

/// Filter, aggregate and report on an already parsed rule table.
///
/// Returns `None` when the filter leaves no rules.
pub fn audit_rules(rules: Vec<Rule>, filter: &RuleFilter, warnings: &[ParseWarning]) -> Option<AuditOutcome> {
    let rules = filter.apply(rules);
    if rules.is_empty() {
        info!("No rules match owners={:?} names={:?}", filter.owners, filter.names);
        return None;
    }

    let mut aggregator = TestAggregator::new();
    aggregator.aggregate(&rules);

    let malformed = warnings.iter().filter(|w| w.is_malformed_test()).count();
    let summary = summarize_audit(&rules, &aggregator, malformed);
    let reference_set_report = build_reference_set_report(&rules);
    let test_stats = build_test_stats_report(&aggregator);
    debug!(
        "Audit of {} rules produced {} reference-set rows and {} test rows",
        aggregator.rules_visited(),
        reference_set_report.len(),
        test_stats.len()
    );

    Some(AuditOutcome { reference_set_report, test_stats, rules, summary })
}

/// Run a full audit of the export at `path`.
///
/// Parse warnings are returned even when the filter leaves no rules.
/// `progress` is forwarded to the parser.
pub fn run_audit<F>(path: &Path, filter: &RuleFilter, progress: F) -> Result<AuditRun>
where
    F: FnMut(usize, usize),
{
    let parsed = parser::read_rules_from_file(path, progress)?;
    let outcome = audit_rules(parsed.rules, filter, &parsed.warnings);
    Ok(AuditRun { warnings: parsed.warnings, outcome })
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod audit_test;
