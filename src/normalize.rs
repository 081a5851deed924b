/// Test normalization
///
/// Exports phrase the same condition several ways ("IS NOT", a leading
/// "and" on continuation lines). Normalizing collapses those variants so
/// tests can be compared as plain strings.
use std::fmt;

/// A test line with fewer than two tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTest {
    pub line: String,
}

impl fmt::Display for MalformedTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed test {:?}", self.line)
    }
}

/// Canonicalize a raw test line.
///
/// Splits on single spaces, drops a second token equal to "not" and a
/// first token equal to "and" (both case-insensitive), and rejoins.
pub fn normalize_test(raw: &str) -> Result<String, MalformedTest> {
    let mut tokens: Vec<&str> = raw.trim().split(' ').collect();
    if tokens.len() < 2 {
        return Err(MalformedTest { line: raw.trim().to_string() });
    }

    if tokens[1].eq_ignore_ascii_case("not") {
        tokens.remove(1);
    }
    if tokens[0].eq_ignore_ascii_case("and") {
        tokens.remove(0);
    }

    Ok(tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(normalize_test("  when the event matches  \n").unwrap(), "when the event matches");
    }

    #[test]
    fn test_drops_negation_in_second_position() {
        assert_eq!(
            normalize_test("when NOT any of these BB are contained").unwrap(),
            "when any of these BB are contained"
        );
    }

    #[test]
    fn test_drops_leading_conjunction() {
        assert_eq!(normalize_test("and when the payload contains x").unwrap(), "when the payload contains x");
        assert_eq!(normalize_test("AND not when x").unwrap(), "when x");
    }

    #[test]
    fn test_not_elsewhere_is_kept() {
        assert_eq!(normalize_test("when the source is not local").unwrap(), "when the source is not local");
    }

    #[test]
    fn test_single_token_is_malformed() {
        let err = normalize_test("Y").unwrap_err();
        assert_eq!(err.line, "Y");
        assert!(normalize_test("").is_err());
        assert!(normalize_test("   \n").is_err());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "and when the event matches the following regex",
            "when NOT the payload contains admin",
            "when the flow source is one of the following",
        ];
        for sample in samples {
            let once = normalize_test(sample).unwrap();
            let twice = normalize_test(&once).unwrap();
            assert_eq!(once, twice, "normalizing {:?} twice changed it", sample);
        }
    }
}
