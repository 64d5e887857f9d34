//! Code-cell splitting.

use codeflags_types::well_known::ENTRY_SEPARATOR;

/// Splits a raw code cell into its atomic segments.
///
/// Every whitespace character is removed first, not just leading and
/// trailing ones, so `"250. x , 251"` yields `["250.x", "251"]`. Empty
/// segments are kept: a doubled comma produces an empty string, and an empty
/// cell produces exactly one.
pub fn split_cell(cell: &str) -> Vec<String> {
    let stripped: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    stripped.split(ENTRY_SEPARATOR).map(str::to_string).collect()
}
