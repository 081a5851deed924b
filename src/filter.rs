/// Rule selection by owner and rule-name substrings
///
/// Matching is case-sensitive, unanchored substring containment. A rule is
/// kept when it matches every criterion that was given; an absent criterion
/// matches everything.
use crate::types::Rule;
use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub owners: Option<Vec<String>>,
    pub names: Option<Vec<String>>,
}

impl RuleFilter {
    pub fn new(owners: Option<Vec<String>>, names: Option<Vec<String>>) -> Self {
        Self { owners, names }
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_none() && self.names.is_none()
    }

    pub fn matches(&self, rule: &Rule) -> bool {
        contains_any(&rule.owner, self.owners.as_deref()) && contains_any(&rule.name, self.names.as_deref())
    }

    /// Keep the matching rules, preserving table order
    pub fn apply(&self, rules: Vec<Rule>) -> Vec<Rule> {
        if self.is_empty() {
            return rules;
        }

        let before = rules.len();
        let kept: Vec<Rule> = rules.into_iter().filter(|rule| self.matches(rule)).collect();
        debug!("Filter kept {} of {} rules (owners={:?}, names={:?})", kept.len(), before, self.owners, self.names);
        kept
    }
}

fn contains_any(value: &str, needles: Option<&[String]>) -> bool {
    match needles {
        None => true,
        Some(needles) => needles.iter().any(|needle| value.contains(needle.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, owner: &str) -> Rule {
        Rule {
            name: name.to_string(),
            enabled: true,
            is_building_block: false,
            owner: owner.to_string(),
            response_limiter: None,
            reference_set_target: None,
            tests: vec![],
            extra: vec![],
        }
    }

    fn names(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_owner_substring_filter() {
        let rules = vec![rule("a", "bob@acme.com"), rule("b", "carol@other.com")];
        let filter = RuleFilter::new(Some(vec!["acme".to_string()]), None);
        assert_eq!(names(&filter.apply(rules)), vec!["a"]);
    }

    #[test]
    fn test_name_filter_any_of() {
        let rules = vec![rule("Login Failures", "x"), rule("Port Scan", "x"), rule("Malware Beacon", "x")];
        let filter = RuleFilter::new(None, Some(vec!["Scan".to_string(), "Login".to_string()]));
        assert_eq!(names(&filter.apply(rules)), vec!["Login Failures", "Port Scan"]);
    }

    #[test]
    fn test_both_criteria_must_match() {
        let rules = vec![rule("Port Scan", "bob@acme.com"), rule("Port Scan 2", "eve@other.com")];
        let filter = RuleFilter::new(Some(vec!["acme".to_string()]), Some(vec!["Scan".to_string()]));
        assert_eq!(names(&filter.apply(rules)), vec!["Port Scan"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let rules = vec![rule("Port Scan", "Bob@ACME.com")];
        let filter = RuleFilter::new(Some(vec!["acme".to_string()]), None);
        assert!(filter.apply(rules).is_empty());
    }

    #[test]
    fn test_no_criteria_returns_identical_table() {
        let rules = vec![rule("a", "x"), rule("b", "y")];
        assert_eq!(RuleFilter::default().apply(rules.clone()), rules);
    }

    #[test]
    fn test_filtered_table_is_subset_in_order() {
        let rules: Vec<Rule> = (0..10).map(|i| rule(&format!("rule {}", i), if i % 3 == 0 { "acme" } else { "x" })).collect();
        let filter = RuleFilter::new(Some(vec!["acme".to_string()]), None);
        let kept = filter.apply(rules.clone());
        let mut cursor = rules.iter();
        for r in &kept {
            assert!(cursor.any(|orig| orig == r), "{} is not in original order", r.name);
        }
        assert_eq!(names(&kept), vec!["rule 0", "rule 3", "rule 6", "rule 9"]);
    }
}
