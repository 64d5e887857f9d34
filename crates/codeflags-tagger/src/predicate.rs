//! In-memory rule predicates.
//!
//! Compiled expressions are written for an engine that anchors a pattern at
//! both ends (`ABC` means `^ABC$`). The `regex` crate searches for
//! substrings instead, so the matcher adds the anchors itself.

use codeflags_types::{RangeRule, TagRule};
use regex::Regex;

/// How a rule tests a code.
#[derive(Debug, Clone)]
enum CodeTest {
    Pattern(Regex),
    Range(RangeRule),
}

/// A rule ready to be evaluated against dataset rows.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    code_type: String,
    test: CodeTest,
}

impl RuleMatcher {
    /// Prepares a rule for matching.
    ///
    /// # Errors
    /// Returns the regex error if a pattern rule's expression does not
    /// compile (e.g. an unbalanced parenthesis copied from the sheet).
    pub fn new(rule: &TagRule) -> Result<Self, regex::Error> {
        let test = match rule {
            TagRule::Pattern(p) => CodeTest::Pattern(Regex::new(&anchor(&p.expression))?),
            TagRule::Range(r) => CodeTest::Range(r.clone()),
        };
        Ok(Self {
            code_type: rule.code_type().as_str().to_string(),
            test,
        })
    }

    /// Returns true if a row with this code and code type is tagged by the rule.
    ///
    /// The row's code type must contain the rule's normalized code type, so a
    /// rule for `10` tags rows typed `10` or `ICD10`.
    pub fn matches(&self, code: &str, code_type: &str) -> bool {
        if !code_type.contains(self.code_type.as_str()) {
            return false;
        }
        match &self.test {
            CodeTest::Pattern(re) => re.is_match(code),
            CodeTest::Range(range) => range.contains(code),
        }
    }
}

/// Wraps an expression so it must match the whole code.
fn anchor(expression: &str) -> String {
    format!("^(?:{expression})$")
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeflags_types::{CodeType, PatternRule};

    fn pattern(code_type: CodeType, expression: &str) -> TagRule {
        TagRule::Pattern(PatternRule {
            code_type,
            category: "Cat".to_string(),
            expression: expression.to_string(),
        })
    }

    #[test]
    fn test_pattern_is_anchored() {
        let matcher = RuleMatcher::new(&pattern(CodeType::Icd10, "I10.*|I11..*")).unwrap();
        assert!(matcher.matches("I10", "10"));
        assert!(matcher.matches("I1090", "10"));
        assert!(matcher.matches("I119", "10"));
        // I11 needs one more character.
        assert!(!matcher.matches("I11", "10"));
        // No substring matches.
        assert!(!matcher.matches("XI10", "10"));
    }

    #[test]
    fn test_wildcard_dot_matches_one_character() {
        let matcher = RuleMatcher::new(&pattern(CodeType::Icd9, "250...*")).unwrap();
        assert!(matcher.matches("250.0", "9"));
        assert!(matcher.matches("25001", "9"));
        assert!(!matcher.matches("250", "9"));
    }

    #[test]
    fn test_code_type_is_substring_filter() {
        let matcher = RuleMatcher::new(&pattern(CodeType::Icd10, "I10.*")).unwrap();
        assert!(matcher.matches("I10", "ICD10"));
        assert!(!matcher.matches("I10", "9"));
    }

    #[test]
    fn test_range_matcher() {
        let rule = TagRule::Range(RangeRule {
            code_type: CodeType::Icd9,
            category: "Neoplasms".to_string(),
            raw: "170-182".to_string(),
            low: "170".to_string(),
            high: "182ZZZZ".to_string(),
        });
        let matcher = RuleMatcher::new(&rule).unwrap();
        assert!(matcher.matches("1823", "9"));
        assert!(!matcher.matches("183", "9"));
        assert!(!matcher.matches("175", "10"));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(RuleMatcher::new(&pattern(CodeType::Icd9, "250(.*")).is_err());
    }
}
