//! Per-rule outcomes of a tagging run.

use codeflags_types::TagRule;

/// What happened when one rule was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Position of the rule in the rule set.
    pub rule_index: usize,
    /// The rule's matched-code tag value.
    pub map_code: String,
    /// The rule's category.
    pub category: String,
    /// How many attempts were made.
    pub attempts: u32,
    /// Rows tagged, or the last error message.
    pub result: Result<usize, String>,
}

impl RuleOutcome {
    pub(crate) fn new(
        rule_index: usize,
        rule: &TagRule,
        attempts: u32,
        result: Result<usize, String>,
    ) -> Self {
        Self {
            rule_index,
            map_code: rule.map_code().to_string(),
            category: rule.category().to_string(),
            attempts,
            result,
        }
    }

    /// Returns true if the rule was applied.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes for every rule of a run, in rule-set order.
#[derive(Debug, Clone, Default)]
pub struct TaggingReport {
    /// One entry per rule.
    pub outcomes: Vec<RuleOutcome>,
}

impl TaggingReport {
    /// Returns the outcomes of rules that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// Returns true if every rule was applied.
    pub fn all_applied(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::is_ok)
    }

    /// Total rows tagged across all applied rules.
    pub fn rows_tagged(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .sum()
    }
}
