//! Code-list row type.
//!
//! This module provides the `CodeListRow` struct representing one row of a
//! code-list spreadsheet after it has been exported to delimited text.

use crate::code_type::is_icd;

/// A row of a code-list spreadsheet.
///
/// All fields are text; cells the spreadsheet stored as numbers must be
/// rendered as text before they get here.
///
/// # Examples
///
/// ```
/// use codeflags_types::CodeListRow;
///
/// let row = CodeListRow {
///     row: 1,
///     code_type: "ICD-9".to_string(),
///     code: "250.x, 250.1-250.3".to_string(),
///     category: "Diabetes".to_string(),
/// };
///
/// assert!(row.is_icd());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeListRow {
    /// 1-based data row number in the source file (header excluded).
    pub row: usize,
    /// Free-text code type, e.g. `ICD-9` or `CPT`.
    pub code_type: String,
    /// Raw code cell: comma-separated codes, wildcards and ranges.
    pub code: String,
    /// Category label taken from the caller-named column.
    pub category: String,
}

impl CodeListRow {
    /// Returns true if this row carries ICD codes and should be compiled.
    pub fn is_icd(&self) -> bool {
        is_icd(&self.code_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_list_row_filter() {
        let icd = CodeListRow {
            row: 1,
            code_type: "icd10".to_string(),
            code: "I10".to_string(),
            category: "Hypertension".to_string(),
        };
        let cpt = CodeListRow {
            code_type: "CPT".to_string(),
            ..icd.clone()
        };

        assert!(icd.is_icd());
        assert!(!cpt.is_icd());
    }
}
