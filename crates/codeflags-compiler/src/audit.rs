//! Audit tables.
//!
//! Writes the two intermediate tables of a compilation as CSV so reviewers
//! can diff them between code-list revisions: the exploded entry table and
//! the grouped pattern table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use codeflags_types::well_known::{CODE_COLUMN, CODE_TYPE_COLUMN};
use codeflags_types::{AtomicEntry, PatternRule};

use crate::types::CompileResult;

/// Columns of the entry table, after the category column is inserted.
const ENTRY_COLUMNS: &[&str] = &["code_orig", CODE_COLUMN, "kind", "code_range", "code_regex"];

/// Column holding the compiled expression in both tables.
const REGEX_COLUMN: &str = "code_regex";

/// Writes the exploded entry table.
///
/// One row per atomic entry: code type, category (under
/// `category_column`), the original cell, the stripped segment, its kind,
/// and either its range text or its expression.
pub fn write_entry_table<W: Write>(
    writer: W,
    category_column: &str,
    entries: &[AtomicEntry],
) -> CompileResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![CODE_TYPE_COLUMN, category_column];
    header.extend_from_slice(ENTRY_COLUMNS);
    csv_writer.write_record(&header)?;

    for entry in entries {
        csv_writer.write_record([
            entry.code_type.as_str(),
            entry.category.as_str(),
            entry.code_orig.as_str(),
            entry.raw.as_str(),
            entry.kind.as_str(),
            entry.range_text().unwrap_or(""),
            entry.expression.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the grouped pattern table: one row per pattern rule.
pub fn write_pattern_table<W: Write>(
    writer: W,
    category_column: &str,
    patterns: &[PatternRule],
) -> CompileResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([CODE_TYPE_COLUMN, category_column, REGEX_COLUMN])?;

    for rule in patterns {
        csv_writer.write_record([
            rule.code_type.as_str(),
            rule.category.as_str(),
            rule.expression.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the entry table to a file, replacing it if present.
pub fn write_entry_table_file<P: AsRef<Path>>(
    path: P,
    category_column: &str,
    entries: &[AtomicEntry],
) -> CompileResult<()> {
    write_entry_table(File::create(path)?, category_column, entries)
}

/// Writes the pattern table to a file, replacing it if present.
pub fn write_pattern_table_file<P: AsRef<Path>>(
    path: P,
    category_column: &str,
    patterns: &[PatternRule],
) -> CompileResult<()> {
    write_pattern_table(File::create(path)?, category_column, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::compile;
    use codeflags_types::CodeListRow;

    fn compilation() -> crate::builder::Compilation {
        compile(&[
            CodeListRow {
                row: 1,
                code_type: "ICD-9".to_string(),
                code: "250.x, 250.1-250.3".to_string(),
                category: "Diabetes".to_string(),
            },
            CodeListRow {
                row: 2,
                code_type: "ICD-9".to_string(),
                code: "251".to_string(),
                category: "Diabetes".to_string(),
            },
        ])
    }

    #[test]
    fn test_write_entry_table() {
        let mut out = Vec::new();
        write_entry_table(&mut out, "descr2", &compilation().entries).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "code_type,descr2,code_orig,code,kind,code_range,code_regex"
        );
        assert_eq!(
            lines[1],
            "9,Diabetes,\"250.x, 250.1-250.3\",250.x,PATTERN,,250...*"
        );
        assert_eq!(
            lines[2],
            "9,Diabetes,\"250.x, 250.1-250.3\",250.1-250.3,RANGE,250.1-250.3,"
        );
        assert_eq!(lines[3], "9,Diabetes,251,251,PATTERN,,251.*");
    }

    #[test]
    fn test_write_pattern_table() {
        let mut out = Vec::new();
        write_pattern_table(&mut out, "descr2", &compilation().pattern_groups).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "code_type,descr2,code_regex\n9,Diabetes,250...*|251.*\n");
    }

    #[test]
    fn test_tables_are_reproducible() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_entry_table(&mut first, "descr2", &compilation().entries).unwrap();
        write_entry_table(&mut second, "descr2", &compilation().entries).unwrap();
        assert_eq!(first, second);
    }
}
