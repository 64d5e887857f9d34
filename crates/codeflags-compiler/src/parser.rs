//! Code-list file reader.
//!
//! Provides a streaming reader for code-list spreadsheets exported to
//! delimited text. Columns are located by header name, so the sheet may carry
//! any number of extra columns in any order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use codeflags_types::CodeListRow;
use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{CodeListConfig, CompileError, CompileResult};

/// Positions of the three columns the compiler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    code_type: usize,
    code: usize,
    category: usize,
}

/// A streaming reader for code-list files.
///
/// Yields one [`CodeListRow`] per non-blank data row. Every cell is read as
/// text; nothing is filtered here.
pub struct CodeListReader<R: Read> {
    reader: Reader<R>,
    columns: ColumnIndex,
    records_read: usize,
}

impl CodeListReader<BufReader<File>> {
    /// Creates a new reader from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header lacks a
    /// configured column.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &CodeListConfig) -> CompileResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CompileError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read> CodeListReader<R> {
    /// Creates a new reader from any byte source.
    pub fn from_reader(reader: R, config: &CodeListConfig) -> CompileResult<Self> {
        config.validate()?;

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let columns = Self::resolve_columns(&mut csv_reader, config)?;

        Ok(Self {
            reader: csv_reader,
            columns,
            records_read: 0,
        })
    }

    /// Finds the configured columns in the header row.
    fn resolve_columns(
        reader: &mut Reader<R>,
        config: &CodeListConfig,
    ) -> CompileResult<ColumnIndex> {
        let headers = reader.headers()?;
        let find = |name: &str| {
            headers
                .iter()
                // Handle UTF-8 BOM at start of file
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };

        let code_type = find(&config.code_type_column).ok_or_else(|| CompileError::MissingColumn {
            column: config.code_type_column.clone(),
        })?;
        let code = find(&config.code_column).ok_or_else(|| CompileError::MissingColumn {
            column: config.code_column.clone(),
        })?;
        let category = find(&config.category_column).ok_or_else(|| CompileError::Configuration {
            message: format!(
                "category column '{}' not found in code list header",
                config.category_column
            ),
        })?;

        Ok(ColumnIndex {
            code_type,
            code,
            category,
        })
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Reads all remaining rows into a Vec.
    ///
    /// Stops at the first malformed record.
    pub fn read_all(self) -> CompileResult<Vec<CodeListRow>> {
        self.collect()
    }

    fn to_row(&self, record: &StringRecord) -> CodeListRow {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        CodeListRow {
            row: self.records_read,
            code_type: field(self.columns.code_type),
            code: field(self.columns.code),
            category: field(self.columns.category),
        }
    }
}

impl<R: Read> Iterator for CodeListReader<R> {
    type Item = CompileResult<CodeListRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip empty records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(Ok(self.to_row(&record)));
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
code_type,code,descr1,descr2
ICD-9,\"250.x, 250.1-250.3\",Diab,Diabetes
,,,
CPT,99213,Visit,Office visit
ICD10,I10,HTN,Hypertension
";

    #[test]
    fn test_read_rows_by_header_name() {
        let reader =
            CodeListReader::from_reader(SHEET.as_bytes(), &CodeListConfig::default()).unwrap();
        let rows = reader.read_all().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].code_type, "ICD-9");
        assert_eq!(rows[0].code, "250.x, 250.1-250.3");
        assert_eq!(rows[0].category, "Diabetes");
        // Blank row 2 is skipped but still counted.
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[2].category, "Hypertension");
    }

    #[test]
    fn test_alternate_category_column() {
        let config = CodeListConfig::with_category_column("descr1");
        let rows = CodeListReader::from_reader(SHEET.as_bytes(), &config)
            .unwrap()
            .read_all()
            .unwrap();
        assert_eq!(rows[0].category, "Diab");
    }

    #[test]
    fn test_missing_category_column_is_configuration_error() {
        let config = CodeListConfig::with_category_column("label");
        let result = CodeListReader::from_reader(SHEET.as_bytes(), &config);
        assert!(matches!(result, Err(CompileError::Configuration { .. })));
    }

    #[test]
    fn test_missing_code_column() {
        let sheet = "code_type,codes,descr2\nICD9,250,Diabetes\n";
        let result = CodeListReader::from_reader(sheet.as_bytes(), &CodeListConfig::default());
        match result {
            Err(CompileError::MissingColumn { column }) => assert_eq!(column, "code"),
            other => panic!("expected MissingColumn, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_bom_and_tab_delimiter() {
        let sheet = "\u{feff}code_type\tcode\tdescr2\nICD10\tE11x\tDiabetes\n";
        let config = CodeListConfig {
            delimiter: b'\t',
            ..Default::default()
        };
        let rows = CodeListReader::from_reader(sheet.as_bytes(), &config)
            .unwrap()
            .read_all()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "E11x");
    }

    #[test]
    fn test_missing_file() {
        let result =
            CodeListReader::from_path("/nonexistent/codelist.csv", &CodeListConfig::default());
        assert!(matches!(result, Err(CompileError::FileNotFound { .. })));
    }
}
