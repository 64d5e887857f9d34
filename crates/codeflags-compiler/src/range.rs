//! Range normalization.
//!
//! Codes are compared as strings, not numbers, so a short upper bound like
//! `182` would exclude `1823`. The upper bound is therefore right-padded with
//! a filler that sorts after every code character.

use codeflags_types::well_known::{RANGE_HIGH_FILLER, RANGE_HIGH_WIDTH, RANGE_SEPARATOR};
use codeflags_types::{AtomicEntry, RangeRule};

use crate::types::{CompileError, CompileResult};

/// Pads an upper bound to [`RANGE_HIGH_WIDTH`] characters.
///
/// Bounds already at least that long are returned unchanged.
pub fn pad_high(high: &str) -> String {
    let len = high.chars().count();
    let mut padded = high.to_string();
    padded.extend(std::iter::repeat(RANGE_HIGH_FILLER).take(RANGE_HIGH_WIDTH.saturating_sub(len)));
    padded
}

/// Splits a range entry into its (low, high) bounds.
///
/// `row` is only used in the error.
///
/// # Errors
/// Returns [`CompileError::MalformedRange`] unless the text splits into
/// exactly two parts on the hyphen.
pub fn normalize_range(row: usize, raw: &str) -> CompileResult<(String, String)> {
    let parts: Vec<&str> = raw.split(RANGE_SEPARATOR).collect();
    match parts.as_slice() {
        [low, high] => Ok((low.to_string(), pad_high(high))),
        _ => Err(CompileError::MalformedRange {
            row,
            raw: raw.to_string(),
            parts: parts.len(),
        }),
    }
}

/// Builds one range rule per range entry, in source order.
///
/// Malformed entries are skipped and returned as errors alongside the rules
/// built from the rest.
pub fn compile_ranges(entries: &[AtomicEntry]) -> (Vec<RangeRule>, Vec<CompileError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for entry in entries.iter().filter(|e| e.is_range()) {
        match normalize_range(entry.row, &entry.raw) {
            Ok((low, high)) => rules.push(RangeRule {
                code_type: entry.code_type.clone(),
                category: entry.category.clone(),
                raw: entry.raw.clone(),
                low,
                high,
            }),
            Err(e) => {
                tracing::warn!("Skipping range entry: {}", e);
                errors.push(e);
            }
        }
    }

    (rules, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_row;
    use codeflags_types::{CodeListRow, CodeType};
    use proptest::prelude::*;

    #[test]
    fn test_pad_high() {
        assert_eq!(pad_high("182"), "182ZZZZ");
        assert_eq!(pad_high("250.3"), "250.3ZZ");
        assert_eq!(pad_high("E11.649"), "E11.649");
        assert_eq!(pad_high("E11.6491"), "E11.6491");
        assert_eq!(pad_high(""), "ZZZZZZZ");
    }

    #[test]
    fn test_normalize_range() {
        assert_eq!(
            normalize_range(1, "250.1-250.3").unwrap(),
            ("250.1".to_string(), "250.3ZZ".to_string())
        );
        assert_eq!(
            normalize_range(1, "170-182").unwrap(),
            ("170".to_string(), "182ZZZZ".to_string())
        );
    }

    #[test]
    fn test_double_hyphen_is_malformed() {
        match normalize_range(7, "100--105") {
            Err(CompileError::MalformedRange { row, raw, parts }) => {
                assert_eq!(row, 7);
                assert_eq!(raw, "100--105");
                assert_eq!(parts, 3);
            }
            other => panic!("expected MalformedRange, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_ranges_skips_bad_entries() {
        let entries = classify_row(&CodeListRow {
            row: 3,
            code_type: "ICD9".to_string(),
            code: "100--105, 110-115, 120".to_string(),
            category: "Other".to_string(),
        });

        let (rules, errors) = compile_ranges(&entries);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].raw, "110-115");
        assert_eq!(rules[0].low, "110");
        assert_eq!(rules[0].high, "115ZZZZ");
        assert_eq!(rules[0].code_type, CodeType::Icd9);
        assert_eq!(errors.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_high_is_padded_or_unchanged(low in "[0-9A-Z.]{0,8}", high in "[0-9A-Z.]{0,10}") {
            let raw = format!("{low}-{high}");
            let (l, h) = normalize_range(1, &raw).unwrap();
            prop_assert_eq!(l, low);
            if high.len() >= RANGE_HIGH_WIDTH {
                prop_assert_eq!(h, high);
            } else {
                prop_assert_eq!(h.len(), RANGE_HIGH_WIDTH);
                prop_assert!(h.starts_with(&high));
            }
        }

        #[test]
        fn prop_padded_high_covers_longer_codes(high in "[0-9]{3}", suffix in "[0-9A-Y]{1,3}") {
            let padded = pad_high(&high);
            let longer = format!("{high}{suffix}");
            prop_assert!(longer.as_str() <= padded.as_str());
        }
    }
}
