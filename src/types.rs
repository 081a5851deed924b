/// Core data structures for rule audits
///
/// This module defines the rule table produced by the parsers and the
/// per-test statistics produced by the aggregator.

/// One exported detection rule
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rule {
    pub name: String,
    pub enabled: bool,

    /// Building blocks are reusable sub-rules rather than standalone alerting rules
    pub is_building_block: bool,

    pub owner: String,

    /// None when the export states "None"
    pub response_limiter: Option<String>,

    /// Reference set this rule writes matches into, if any
    pub reference_set_target: Option<String>,

    /// Normalized tests in declaration order (duplicates preserved)
    pub tests: Vec<String>,

    /// Columns of a tabular export that are not part of the rule schema, in header order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl Rule {
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Check if this rule populates a reference set
    pub fn writes_reference_set(&self) -> bool {
        self.reference_set_target.is_some()
    }
}

/// Kind of a test, decided by keyword search over its normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum TestType {
    Payload,
    ReferenceSet,
    AqlQuery,
    Regex,
    Unclassified,
}

impl TestType {
    /// Keywords checked in priority order; the first hit wins
    const KEYWORDS: [(&'static str, TestType); 4] = [
        ("payload", TestType::Payload),
        ("are contained", TestType::ReferenceSet),
        ("aql filter", TestType::AqlQuery),
        ("matches the following", TestType::Regex),
    ];

    /// Classify a normalized test string (case-insensitive substring search)
    pub fn classify(test: &str) -> Self {
        let lowered = test.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(TestType::Unclassified)
    }

    /// Label used in reports. Unclassified tests report an empty type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Payload => "Payload",
            TestType::ReferenceSet => "Reference Set",
            TestType::AqlQuery => "AQL Query",
            TestType::Regex => "Regex",
            TestType::Unclassified => "",
        }
    }

    /// Human label for console summaries, where an empty string would be confusing
    pub fn display_name(&self) -> &'static str {
        match self {
            TestType::Unclassified => "Unclassified",
            other => other.as_str(),
        }
    }

    pub fn all() -> [TestType; 5] {
        [TestType::Payload, TestType::ReferenceSet, TestType::AqlQuery, TestType::Regex, TestType::Unclassified]
    }
}

/// Aggregated usage of one distinct normalized test
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TestStat {
    pub test_type: TestType,
    pub total_count: usize,
    pub active_count: usize,
    pub inactive_count: usize,

    /// One entry per occurrence in a building block
    pub building_block_names: Vec<String>,

    /// One entry per occurrence in a standalone rule
    pub rule_names: Vec<String>,
}

impl TestStat {
    /// Create an empty record, classifying the test once
    pub fn new(test: &str) -> Self {
        Self {
            test_type: TestType::classify(test),
            total_count: 0,
            active_count: 0,
            inactive_count: 0,
            building_block_names: Vec::new(),
            rule_names: Vec::new(),
        }
    }

    /// Record one occurrence of the test in `rule`
    pub fn record(&mut self, rule: &Rule) {
        self.total_count += 1;
        if rule.enabled {
            self.active_count += 1;
        } else {
            self.inactive_count += 1;
        }

        if rule.is_building_block {
            self.building_block_names.push(rule.name.clone());
        } else {
            self.rule_names.push(rule.name.clone());
        }
    }
}
