//! Compiler-specific types: errors and configuration.

use codeflags_types::well_known::{CODE_COLUMN, CODE_TYPE_COLUMN, DEFAULT_CATEGORY_COLUMN};
use thiserror::Error;

/// Errors that can occur while loading or compiling a code list.
#[derive(Error, Debug)]
pub enum CompileError {
    /// I/O error reading the code-list file.
    #[error("IO error reading code list: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Missing required column in the code-list header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// The category column is unset or absent from the code list.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A range entry did not split into exactly two parts on the hyphen.
    #[error("Malformed range '{raw}' on row {row}: expected 2 parts, found {parts}")]
    MalformedRange {
        /// Data row the entry came from.
        row: usize,
        /// The offending entry.
        raw: String,
        /// How many hyphen-delimited parts it had.
        parts: usize,
    },
}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Configuration for reading a code list.
#[derive(Debug, Clone)]
pub struct CodeListConfig {
    /// Name of the column holding the category label.
    pub category_column: String,
    /// Name of the column holding the code type.
    pub code_type_column: String,
    /// Name of the column holding the code cell.
    pub code_column: String,
    /// Field delimiter of the exported sheet.
    pub delimiter: u8,
}

impl Default for CodeListConfig {
    fn default() -> Self {
        Self {
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            code_type_column: CODE_TYPE_COLUMN.to_string(),
            code_column: CODE_COLUMN.to_string(),
            delimiter: b',',
        }
    }
}

impl CodeListConfig {
    /// Creates a config reading categories from the named column.
    pub fn with_category_column(category_column: impl Into<String>) -> Self {
        Self {
            category_column: category_column.into(),
            ..Default::default()
        }
    }

    /// Checks that every column name is set.
    ///
    /// # Errors
    /// Returns [`CompileError::Configuration`] if the category column name is
    /// blank, and [`CompileError::MissingColumn`] for the other two.
    pub fn validate(&self) -> CompileResult<()> {
        if self.category_column.trim().is_empty() {
            return Err(CompileError::Configuration {
                message: "category column name is empty".to_string(),
            });
        }
        for column in [&self.code_type_column, &self.code_column] {
            if column.trim().is_empty() {
                return Err(CompileError::MissingColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }
}
