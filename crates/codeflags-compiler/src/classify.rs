//! Entry classification.
//!
//! Explodes ICD rows into [`AtomicEntry`] values, deciding for each segment
//! whether it is a range or a pattern and building the pattern's matching
//! expression.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use codeflags_types::well_known::{ANY_SUFFIX, SINGLE_CHAR, WILDCARD};
use codeflags_types::{AtomicEntry, CodeListRow, CodeType, EntryKind};

use crate::cell::split_cell;

/// Builds the matching expression for a pattern segment.
///
/// Each lowercase `x` becomes a single-character token and a match-any
/// suffix is appended, so `250.x` becomes `250...*`.
pub fn pattern_expression(raw: &str) -> String {
    let mut expr = raw.replace(WILDCARD, SINGLE_CHAR);
    expr.push_str(ANY_SUFFIX);
    expr
}

/// Classifies every segment of one row's code cell.
///
/// The code type is normalized once for the row. Range segments keep their
/// text as-is for the range normalizer; pattern segments get an expression.
pub fn classify_row(row: &CodeListRow) -> Vec<AtomicEntry> {
    let code_type = CodeType::normalize(&row.code_type);

    split_cell(&row.code)
        .into_iter()
        .enumerate()
        .map(|(position, raw)| {
            let kind = EntryKind::of(&raw);
            let expression = match kind {
                EntryKind::Pattern => Some(pattern_expression(&raw)),
                EntryKind::Range => None,
            };
            AtomicEntry {
                row: row.row,
                position,
                code_orig: row.code.clone(),
                raw,
                kind,
                code_type: code_type.clone(),
                category: row.category.clone(),
                expression,
            }
        })
        .collect()
}

/// Classifies many rows, returning entries in source order.
#[cfg(feature = "parallel")]
pub fn classify_rows(rows: &[CodeListRow]) -> Vec<AtomicEntry> {
    // Indexed collect keeps row order regardless of scheduling.
    rows.par_iter()
        .map(classify_row)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Classifies many rows, returning entries in source order.
#[cfg(not(feature = "parallel"))]
pub fn classify_rows(rows: &[CodeListRow]) -> Vec<AtomicEntry> {
    rows.iter().flat_map(classify_row).collect()
}
