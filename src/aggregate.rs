/// Test usage aggregation
///
/// Walks the rule table once and builds one `TestStat` per distinct
/// normalized test, in order of first appearance. The aggregator is owned by
/// a single audit run; nothing is shared between runs.
use crate::types::{Rule, TestStat, TestType};
use log::debug;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct TestAggregator {
    index: HashMap<String, usize>,
    stats: Vec<(String, TestStat)>,
    rules_visited: usize,
}

impl TestAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every test of `rule`
    pub fn visit_rule(&mut self, rule: &Rule) {
        for test in &rule.tests {
            let slot = match self.index.get(test) {
                Some(&slot) => slot,
                None => {
                    let stat = TestStat::new(test);
                    debug!("New {:?} test: {}", stat.test_type, test);
                    self.stats.push((test.clone(), stat));
                    self.index.insert(test.clone(), self.stats.len() - 1);
                    self.stats.len() - 1
                }
            };
            self.stats[slot].1.record(rule);
        }
        self.rules_visited += 1;
    }

    /// Record every rule of the table, in table order
    pub fn aggregate(&mut self, rules: &[Rule]) {
        for rule in rules {
            self.visit_rule(rule);
        }
        debug!("Aggregated {} distinct tests over {} rules", self.stats.len(), self.rules_visited);
    }

    #[cfg(test)]
    pub fn get(&self, test: &str) -> Option<&TestStat> {
        self.index.get(test).map(|&slot| &self.stats[slot].1)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn rules_visited(&self) -> usize {
        self.rules_visited
    }

    /// Stats in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestStat)> {
        self.stats.iter().map(|(test, stat)| (test.as_str(), stat))
    }

    /// Number of distinct tests of each type
    pub fn counts_by_type(&self) -> BTreeMap<TestType, usize> {
        let mut counts = BTreeMap::new();
        for (_, stat) in &self.stats {
            *counts.entry(stat.test_type).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod aggregate_test;
