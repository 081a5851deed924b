/// Tests for the audit pipeline
#[cfg(test)]
mod tests {
    use crate::audit::{audit_rules, run_audit};
    use crate::filter::RuleFilter;
    use crate::parser::parse_text;
    use crate::types::TestType;

    const EXPORT: &str = "\
Rule Name: Enabled Detector
Enabled: True
Building Block: False
Owner: bob@acme.com
Response Limiter: None
RESP: Add to Reference Set: Suspicious Hosts
Tests:
    X is contained in payload
    Y
    when the username matches the following regex
Notes:

Rule Name: Disabled Helper
Enabled: False
Building Block: True
Owner: carol@other.com
Response Limiter: None
RESP: Add to Reference Set: None
Tests:
    X is contained in payload
Notes:
";

    fn run(filter: &RuleFilter) -> Option<crate::audit::AuditOutcome> {
        let parsed = parse_text(EXPORT, |_, _| {}).expect("export should parse");
        audit_rules(parsed.rules, filter, &parsed.warnings)
    }

    #[test]
    fn test_shared_test_counts_across_rule_and_building_block() {
        let outcome = run(&RuleFilter::default()).expect("should produce reports");

        let row = outcome.test_stats.iter().find(|r| r.test == "X is contained in payload").unwrap();
        assert_eq!(row.stat.total_count, 2);
        assert_eq!(row.stat.active_count, 1);
        assert_eq!(row.stat.inactive_count, 1);
        assert_eq!(row.stat.rule_names, vec!["Enabled Detector"]);
        assert_eq!(row.stat.building_block_names, vec!["Disabled Helper"]);

        assert!(outcome.test_stats.iter().all(|r| r.test != "Y"), "malformed test must not be aggregated");
        assert_eq!(outcome.summary.malformed_tests, 1);
    }

    #[test]
    fn test_single_use_test_round_trip() {
        let outcome = run(&RuleFilter::default()).unwrap();

        let row = outcome.test_stats.iter().find(|r| r.test == "when the username matches the following regex").unwrap();
        assert_eq!(row.stat.test_type, TestType::Regex);
        assert_eq!(row.stat.total_count, 1);
        assert_eq!(row.stat.active_count, 1);
        assert_eq!(row.stat.inactive_count, 0);
        assert_eq!(row.stat.rule_names, vec!["Enabled Detector"]);
        assert!(row.stat.building_block_names.is_empty());
    }

    #[test]
    fn test_reference_set_report() {
        let outcome = run(&RuleFilter::default()).unwrap();

        assert_eq!(outcome.reference_set_report.len(), 1);
        let row = &outcome.reference_set_report[0];
        assert_eq!(row.name, "Enabled Detector");
        assert_eq!(row.reference_set_target, "Suspicious Hosts");
        assert_eq!(row.test_count, 2);
        assert!(row.enabled);
    }

    #[test]
    fn test_owner_filter_limits_aggregation() {
        let filter = RuleFilter::new(Some(vec!["acme".to_string()]), None);
        let outcome = run(&filter).unwrap();

        assert_eq!(outcome.rules.len(), 1);
        let row = outcome.test_stats.iter().find(|r| r.test == "X is contained in payload").unwrap();
        assert_eq!(row.stat.total_count, 1);
        assert!(row.stat.building_block_names.is_empty());
    }

    #[test]
    fn test_no_matching_rules_is_empty_outcome() {
        let filter = RuleFilter::new(None, Some(vec!["Nonexistent".to_string()]));
        assert!(run(&filter).is_none());
    }

    #[test]
    fn test_run_audit_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.txt");
        std::fs::write(&path, EXPORT).unwrap();

        let run = run_audit(&path, &RuleFilter::default(), |_, _| {}).unwrap();
        assert_eq!(run.warnings.len(), 1);
        let outcome = run.outcome.expect("should produce reports");
        assert_eq!(outcome.summary.rules, 2);
        assert_eq!(outcome.summary.building_blocks, 1);
        assert_eq!(outcome.summary.distinct_tests, 2);
    }

    #[test]
    fn test_run_audit_keeps_warnings_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.txt");
        std::fs::write(&path, EXPORT).unwrap();

        let filter = RuleFilter::new(None, Some(vec!["Nonexistent".to_string()]));
        let run = run_audit(&path, &filter, |_, _| {}).unwrap();
        assert!(run.outcome.is_none());
        assert_eq!(run.warnings.len(), 1);
        assert_eq!(run.warnings[0].rule.as_deref(), Some("Enabled Detector"));
        assert_eq!(run.warnings[0].text, "Y");
    }

    #[test]
    fn test_lines_outside_rules_are_not_counted_as_malformed() {
        let export = format!("Owner: stray\n{}", EXPORT);
        let parsed = parse_text(&export, |_, _| {}).unwrap();
        assert_eq!(parsed.warnings.len(), 2);

        let outcome = audit_rules(parsed.rules, &RuleFilter::default(), &parsed.warnings).unwrap();
        assert_eq!(outcome.summary.malformed_tests, 1);
    }

    #[test]
    fn test_run_audit_propagates_unrecognized_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xml");
        std::fs::write(&path, EXPORT).unwrap();

        assert!(run_audit(&path, &RuleFilter::default(), |_, _| {}).is_err());
    }
}
