//! # codeflags-compiler
//!
//! Compiles ICD code-list spreadsheets into tagging rules.
//!
//! A code-list cell such as `250.x, 250.1-250.3` mixes discrete codes,
//! single-character wildcards and ranges. The pipeline:
//!
//! 1. [`split_cell`] strips whitespace and splits the cell on commas.
//! 2. [`classify_row`] marks each segment as a range or a pattern and builds
//!    pattern expressions (`250.x` → `250...*`).
//! 3. [`compile_patterns`] merges patterns sharing a (code type, category)
//!    into one alternation.
//! 4. [`compile_ranges`] splits ranges into bounds and pads the upper one
//!    (`250.3` → `250.3ZZ`).
//! 5. [`build_rule_set`] lays out pattern rules then range rules.
//!
//! [`compile`] runs all of it; [`compile_file`] reads the code list first.
//!
//! ## Features
//!
//! - `parallel` (default): classifies rows with rayon. Output order is the
//!   same either way.

#![warn(missing_docs)]

pub mod audit;
mod builder;
mod cell;
mod classify;
mod parser;
mod pattern;
mod range;
mod types;

pub use builder::{build_rule_set, compile, compile_file, compile_reader, Compilation};
pub use cell::split_cell;
pub use classify::{classify_row, classify_rows, pattern_expression};
pub use parser::CodeListReader;
pub use pattern::compile_patterns;
pub use range::{compile_ranges, normalize_range, pad_high};
pub use types::{CodeListConfig, CompileError, CompileResult};

// Re-export codeflags-types for convenience
pub use codeflags_types;
