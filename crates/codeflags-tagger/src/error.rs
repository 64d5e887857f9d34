//! Tagger errors.

use thiserror::Error;

/// Errors that stop a tagging run as a whole.
///
/// Failures of individual rules are not errors at this level; they are
/// recorded in the [`TaggingReport`](crate::TaggingReport).
#[derive(Error, Debug)]
pub enum TagError {
    /// I/O error reading or writing a dataset.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Code-list loading or compilation failed.
    #[error(transparent)]
    Compile(#[from] codeflags_compiler::CompileError),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The dataset header lacks a column the run needs.
    #[error("Dataset is missing column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// A filter argument is not of the form `COLUMN=VALUE`.
    #[error("Invalid filter '{value}': expected COLUMN=VALUE")]
    InvalidFilter {
        /// The filter as given.
        value: String,
    },

    /// A statement preparing the output table failed.
    #[error("Setup statement failed: {message}")]
    Setup {
        /// The executor's error message.
        message: String,
    },
}

/// Result type for tagger operations.
pub type TagResult<T> = Result<T, TagError>;
