//! Tagging rules.
//!
//! A compiled code list is a [`RuleSet`]: every pattern rule followed by
//! every range rule. Each rule carries the code type and category it tags
//! matching rows with.
//!
//! # Example
//!
//! ```
//! use codeflags_types::{CodeType, PatternRule, RangeRule, RuleSet, TagRule};
//!
//! let rules = RuleSet::new(vec![
//!     TagRule::Pattern(PatternRule {
//!         code_type: CodeType::Icd9,
//!         category: "Diabetes".to_string(),
//!         expression: "250...*".to_string(),
//!     }),
//!     TagRule::Range(RangeRule {
//!         code_type: CodeType::Icd9,
//!         category: "Diabetes".to_string(),
//!         raw: "250.1-250.3".to_string(),
//!         low: "250.1".to_string(),
//!         high: "250.3ZZ".to_string(),
//!     }),
//! ]);
//!
//! assert_eq!(rules.pattern_rules().count(), 1);
//! assert!(rules.range_rules().all(|r| r.contains("250.2")));
//! ```

use crate::CodeType;

/// All wildcard entries of one (code type, category) group, merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternRule {
    /// Normalized code type.
    pub code_type: CodeType,
    /// Category label.
    pub category: String,
    /// Member expressions joined with `|`, e.g. `I10.*|I11..*`.
    pub expression: String,
}

/// One inclusive range entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRule {
    /// Normalized code type.
    pub code_type: CodeType,
    /// Category label.
    pub category: String,
    /// The entry as written, e.g. `170-182`.
    pub raw: String,
    /// Lower bound, verbatim.
    pub low: String,
    /// Upper bound, padded so longer codes with the same prefix fall inside.
    pub high: String,
}

impl RangeRule {
    /// Returns true if `code` falls between the bounds under string ordering.
    pub fn contains(&self, code: &str) -> bool {
        self.low.as_str() <= code && code <= self.high.as_str()
    }
}

/// A single tagging rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TagRule {
    /// Matches codes against an alternation of wildcard patterns.
    Pattern(PatternRule),
    /// Matches codes between two bounds.
    Range(RangeRule),
}

impl TagRule {
    /// Returns the normalized code type of this rule.
    pub fn code_type(&self) -> &CodeType {
        match self {
            Self::Pattern(rule) => &rule.code_type,
            Self::Range(rule) => &rule.code_type,
        }
    }

    /// Returns the category label of this rule.
    pub fn category(&self) -> &str {
        match self {
            Self::Pattern(rule) => &rule.category,
            Self::Range(rule) => &rule.category,
        }
    }

    /// Returns the value written to the matched-code tag column.
    ///
    /// This is the compiled expression for pattern rules and the range as
    /// written for range rules.
    pub fn map_code(&self) -> &str {
        match self {
            Self::Pattern(rule) => &rule.expression,
            Self::Range(rule) => &rule.raw,
        }
    }

    /// Returns true if this is a pattern rule.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

/// Ordered collection of tagging rules.
///
/// Pattern rules come first, then range rules. A row may satisfy more than
/// one rule; each match produces its own tagged copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    rules: Vec<TagRule>,
}

impl RuleSet {
    /// Creates a rule set from already-ordered rules.
    pub fn new(rules: Vec<TagRule>) -> Self {
        Self { rules }
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over all rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, TagRule> {
        self.rules.iter()
    }

    /// Returns the rules as a slice.
    pub fn as_slice(&self) -> &[TagRule] {
        &self.rules
    }

    /// Iterates over the pattern rules.
    pub fn pattern_rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().filter_map(|rule| match rule {
            TagRule::Pattern(p) => Some(p),
            TagRule::Range(_) => None,
        })
    }

    /// Iterates over the range rules.
    pub fn range_rules(&self) -> impl Iterator<Item = &RangeRule> {
        self.rules.iter().filter_map(|rule| match rule {
            TagRule::Range(r) => Some(r),
            TagRule::Pattern(_) => None,
        })
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a TagRule;
    type IntoIter = std::slice::Iter<'a, TagRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = TagRule;
    type IntoIter = std::vec::IntoIter<TagRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}
