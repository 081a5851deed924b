//! Free-text export parser.
//!
//! Each rule is a block of `Key: value` lines. The tests of a rule follow a
//! `Tests` line, one per line, until a `Notes` line closes the block:
//!
//! ```text
//! Rule Name                     : Excessive Firewall Denies
//! Enabled                       : True
//! Building Block                : False
//! Owner                         : admin
//! Response Limiter              : None
//! RESP: Add to Reference Set    : None
//! Tests                         :
//!     when the event(s) were detected by one or more of Firewall
//!     and when the event QID is one of the following Deny
//! Notes                         : ...
//! ```

use super::{ParseWarning, ParsedExport};
use crate::error::{AuditError, Result};
use crate::normalize::normalize_test;
use crate::types::Rule;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    InTests,
}

/// Fields collected for the rule currently being read
#[derive(Debug, Default)]
struct RuleDraft {
    index: usize,
    name: String,
    enabled: Option<bool>,
    is_building_block: Option<bool>,
    owner: Option<String>,
    response_limiter: Option<String>,
    reference_set_target: Option<String>,
    tests: Vec<String>,
}

impl RuleDraft {
    fn into_rule(self) -> Result<Rule> {
        let missing = |field| AuditError::MissingField { rule: self.name.clone(), field };
        let enabled = self.enabled.ok_or_else(|| missing("Enabled"))?;
        let is_building_block = self.is_building_block.ok_or_else(|| missing("Building Block"))?;
        let owner = self.owner.clone().ok_or_else(|| missing("Owner"))?;

        Ok(Rule {
            name: self.name,
            enabled,
            is_building_block,
            owner,
            response_limiter: self.response_limiter,
            reference_set_target: self.reference_set_target,
            tests: self.tests,
            extra: Vec::new(),
        })
    }
}

struct TextParser {
    state: State,
    current: Option<RuleDraft>,
    started: usize,
    pending_tests: Vec<String>,
    output: ParsedExport,
}

impl TextParser {
    fn new() -> Self {
        Self {
            state: State::Scanning,
            current: None,
            started: 0,
            pending_tests: Vec::new(),
            output: ParsedExport::default(),
        }
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|draft| draft.name.as_str())
    }

    fn start_rule(&mut self, name: String) -> Result<()> {
        self.finish_rule()?;
        debug!("Rule #{} started: {}", self.started, name);
        self.current = Some(RuleDraft { index: self.started, name, ..RuleDraft::default() });
        self.started += 1;
        Ok(())
    }

    fn finish_rule(&mut self) -> Result<()> {
        if let Some(draft) = self.current.take() {
            debug!("Rule #{} finished with {} tests", draft.index, draft.tests.len());
            self.output.rules.push(draft.into_rule()?);
        }
        Ok(())
    }

    fn commit_tests(&mut self) {
        let tests = std::mem::take(&mut self.pending_tests);
        if let Some(draft) = self.current.as_mut() {
            draft.tests = tests;
        }
    }

    fn ignore_line(&mut self, line_no: u64, line: &str) {
        self.output.warnings.push(ParseWarning::outside_rule(line_no, line));
    }

    /// Apply a field setter to the current rule, ignoring fields outside any rule
    fn set_field<F>(&mut self, line_no: u64, line: &str, set: F)
    where
        F: FnOnce(&mut RuleDraft),
    {
        if let Some(draft) = self.current.as_mut() {
            set(draft);
        } else {
            self.ignore_line(line_no, line);
        }
    }

    fn feed(&mut self, line_no: u64, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        if self.state == State::InTests {
            if line.starts_with("Notes") {
                self.commit_tests();
                self.state = State::Scanning;
            } else if self.current.is_none() {
                self.ignore_line(line_no, line);
            } else {
                match normalize_test(line) {
                    Ok(test) => self.pending_tests.push(test),
                    Err(malformed) => {
                        let warning = ParseWarning::malformed_test(self.current_name(), line_no, &malformed.line);
                        self.output.warnings.push(warning);
                    }
                }
            }
            return Ok(());
        }

        if line.starts_with("Rule Name") {
            self.start_rule(value_after_colon(line, 1))?;
        } else if line.starts_with("Enabled") {
            let enabled = value_after_colon(line, 1) == "True";
            self.set_field(line_no, line, |draft| draft.enabled = Some(enabled));
        } else if line.starts_with("Building Block") {
            let building_block = value_after_colon(line, 1) == "True";
            self.set_field(line_no, line, |draft| draft.is_building_block = Some(building_block));
        } else if line.starts_with("Owner") {
            let owner = value_after_colon(line, 1);
            self.set_field(line_no, line, |draft| draft.owner = Some(owner));
        } else if line.starts_with("RESP: Add to Reference Set") {
            let target = optional_value(value_after_colon(line, 2));
            self.set_field(line_no, line, |draft| draft.reference_set_target = target);
        } else if line.starts_with("Response Limiter") {
            let limiter = optional_value(value_after_colon(line, 1));
            self.set_field(line_no, line, |draft| draft.response_limiter = limiter);
        } else if line.starts_with("Tests") {
            self.state = State::InTests;
        } else if self.current.is_none() {
            self.ignore_line(line_no, line);
        }

        Ok(())
    }

    fn finish(mut self) -> Result<ParsedExport> {
        if self.state == State::InTests {
            debug!("Export ended inside a test block of {:?}; committing its tests", self.current_name());
            self.commit_tests();
        }
        self.finish_rule()?;
        Ok(self.output)
    }
}

/// Everything after the `n`th colon, trimmed. Empty if there are fewer colons.
fn value_after_colon(line: &str, n: usize) -> String {
    line.splitn(n + 1, ':').nth(n).map(str::trim).unwrap_or_default().to_string()
}

/// "None" (or nothing at all) means the field is unset
fn optional_value(value: String) -> Option<String> {
    if value.is_empty() || value == "None" { None } else { Some(value) }
}

/// Parse a free-text export.
///
/// A leading byte-order mark is skipped. A test block still open at end of
/// input is committed to the last rule.
pub fn parse_text<F>(content: &str, mut progress: F) -> Result<ParsedExport>
where
    F: FnMut(usize, usize),
{
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len();
    let mut parser = TextParser::new();

    for (i, line) in lines.iter().enumerate() {
        parser.feed(i as u64 + 1, line)?;
        progress(i + 1, total);
    }

    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_after_colon_keeps_later_colons() {
        assert_eq!(value_after_colon("Owner : DOMAIN:user", 1), "DOMAIN:user");
        assert_eq!(value_after_colon("RESP: Add to Reference Set : Bad IPs", 2), "Bad IPs");
        assert_eq!(value_after_colon("RESP: Add to Reference Set", 2), "");
    }

    #[test]
    fn test_optional_value() {
        assert_eq!(optional_value("None".to_string()), None);
        assert_eq!(optional_value(String::new()), None);
        assert_eq!(optional_value("10 per hour".to_string()), Some("10 per hour".to_string()));
    }
}
