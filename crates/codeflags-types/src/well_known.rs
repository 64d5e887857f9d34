//! Well-known code-list syntax tokens and column names.
//!
//! This module provides constants for the characters a code-list cell may
//! contain, the tokens emitted into compiled matching expressions, and the
//! column names shared between the code list and the tagged output.
//!
//! # Examples
//!
//! ```
//! use codeflags_types::well_known;
//!
//! // A wildcard code expands into single-character tokens plus a suffix.
//! let expr = format!(
//!     "{}{}",
//!     "250.x".replace(well_known::WILDCARD, well_known::SINGLE_CHAR),
//!     well_known::ANY_SUFFIX
//! );
//! assert_eq!(expr, "250...*");
//!
//! assert_eq!(well_known::RANGE_HIGH_WIDTH, 7);
//! ```

// =============================================================================
// Cell Syntax
// =============================================================================

/// Separator between atomic entries in a code-list cell.
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between the low and high bound of a range entry.
///
/// Any entry containing this character is a range.
pub const RANGE_SEPARATOR: char = '-';

/// Wildcard standing for exactly one character in a code.
///
/// Lowercase only; an uppercase `X` is a literal code character.
pub const WILDCARD: char = 'x';

// =============================================================================
// Expression Tokens
// =============================================================================

/// Token matching any single character.
pub const SINGLE_CHAR: &str = ".";

/// Token appended to every pattern so longer codes with the same prefix match.
pub const ANY_SUFFIX: &str = ".*";

/// Alternation between the member patterns of one group.
pub const OR_COMBINATOR: &str = "|";

// =============================================================================
// Range Bounds
// =============================================================================

/// Filler that collates after every digit and letter used in codes.
pub const RANGE_HIGH_FILLER: char = 'Z';

/// Width the high bound of a range is padded to.
///
/// A high bound of `182` becomes `182ZZZZ` so that `1823` still compares
/// below it.
pub const RANGE_HIGH_WIDTH: usize = 7;

// =============================================================================
// Code Types
// =============================================================================

/// Marker a code-type value must contain (case-insensitively) to be kept.
pub const ICD_MARKER: &str = "ICD";

/// Substring identifying an ICD-9 code type.
pub const ICD9_MARKER: &str = "9";

/// Substring identifying an ICD-10 code type.
pub const ICD10_MARKER: &str = "10";

// =============================================================================
// Columns
// =============================================================================

/// Code-list column holding the code type.
pub const CODE_TYPE_COLUMN: &str = "code_type";

/// Code-list column holding the raw code cell.
pub const CODE_COLUMN: &str = "code";

/// Default name of the code-list column holding the category label.
pub const DEFAULT_CATEGORY_COLUMN: &str = "descr2";

/// Tag column holding the matched rule's code (expression or raw range).
pub const MAP_CODE: &str = "MAP_CODE";

/// Tag column holding the matched rule's normalized code type.
pub const MAP_CODE_TYPE: &str = "MAP_CODE_TYPE";

/// Tag column holding the matched rule's category.
pub const MAP_DESCR: &str = "MAP_DESCR";

/// The three tag columns appended to every tagged row, in output order.
pub const TAG_COLUMNS: [&str; 3] = [MAP_CODE, MAP_CODE_TYPE, MAP_DESCR];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_collates_after_code_characters() {
        for c in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXY.".chars() {
            assert!(c < RANGE_HIGH_FILLER, "{c} should sort before the filler");
        }
    }

    #[test]
    fn test_tag_columns_are_distinct() {
        for (i, a) in TAG_COLUMNS.iter().enumerate() {
            for (j, b) in TAG_COLUMNS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Duplicate tag column found");
                }
            }
        }
    }
}
