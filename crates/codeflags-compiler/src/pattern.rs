//! Pattern compilation.
//!
//! Merges every pattern entry sharing a (code type, category) key into a
//! single alternation so the tagger issues one match per group instead of
//! one per code.

use std::collections::BTreeMap;

use codeflags_types::well_known::OR_COMBINATOR;
use codeflags_types::{AtomicEntry, CodeType, PatternRule};

/// Groups pattern entries and joins each group's expressions.
///
/// Range entries are ignored. Within a group, expressions are joined in the
/// order the entries appear in `entries`. Groups are emitted in ascending
/// (code type, category) order, so identical input always yields identical
/// output.
pub fn compile_patterns(entries: &[AtomicEntry]) -> Vec<PatternRule> {
    let mut groups: BTreeMap<(&str, &str), (&CodeType, Vec<&str>)> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.is_pattern()) {
        let Some(expression) = entry.expression.as_deref() else {
            continue;
        };
        groups
            .entry((entry.code_type.as_str(), entry.category.as_str()))
            .or_insert_with(|| (&entry.code_type, Vec::new()))
            .1
            .push(expression);
    }

    groups
        .into_iter()
        .map(|((_, category), (code_type, members))| PatternRule {
            code_type: code_type.clone(),
            category: category.to_string(),
            expression: members.join(OR_COMBINATOR),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_row;
    use codeflags_types::CodeListRow;

    fn entries(rows: &[(&str, &str, &str)]) -> Vec<AtomicEntry> {
        rows.iter()
            .enumerate()
            .flat_map(|(i, (code_type, code, category))| {
                classify_row(&CodeListRow {
                    row: i + 1,
                    code_type: code_type.to_string(),
                    code: code.to_string(),
                    category: category.to_string(),
                })
            })
            .collect()
    }

    #[test]
    fn test_same_key_merges_in_source_order() {
        let rules = compile_patterns(&entries(&[
            ("ICD10", "I10", "Hypertension"),
            ("ICD10", "I11x", "Hypertension"),
        ]));

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code_type, CodeType::Icd10);
        assert_eq!(rules[0].category, "Hypertension");
        assert_eq!(rules[0].expression, "I10.*|I11..*");
    }

    #[test]
    fn test_different_code_type_or_category_never_merge() {
        let rules = compile_patterns(&entries(&[
            ("ICD9", "401", "Hypertension"),
            ("ICD10", "I10", "Hypertension"),
            ("ICD10", "E11", "Diabetes"),
        ]));

        assert_eq!(rules.len(), 3);
        // Emitted in key order: ("10","Diabetes"), ("10","Hypertension"), ("9","Hypertension").
        assert_eq!(rules[0].expression, "E11.*");
        assert_eq!(rules[1].expression, "I10.*");
        assert_eq!(rules[2].expression, "401.*");
    }

    #[test]
    fn test_single_member_group_still_emitted() {
        let rules = compile_patterns(&entries(&[("ICD-9", "250.x", "Diabetes")]));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].expression, "250...*");
    }

    #[test]
    fn test_ranges_are_ignored() {
        let rules = compile_patterns(&entries(&[("ICD-9", "170-182", "Neoplasms")]));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_normalized_labels_share_a_group() {
        // "ICD-9" and "ICD9CM" both normalize to "9".
        let rules = compile_patterns(&entries(&[
            ("ICD-9", "401", "Hypertension"),
            ("ICD9CM", "402x", "Hypertension"),
        ]));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].expression, "401.*|402..*");
    }
}
