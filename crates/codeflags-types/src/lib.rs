//! # codeflags-types
//!
//! Type definitions for ICD code-list groupings and the tagging rules
//! compiled from them.
//!
//! A code list is a spreadsheet whose rows pair a code type (`ICD-9`,
//! `ICD10`, ...) and a category label with a free-text cell of codes such as
//! `250.x, 250.1-250.3`. This crate provides the row, entry and rule types
//! shared by the compiler and the tagger.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use codeflags_types::{CodeListRow, CodeType, EntryKind};
//! use codeflags_types::well_known;
//!
//! let row = CodeListRow {
//!     row: 1,
//!     code_type: "ICD-9".to_string(),
//!     code: "250.x, 250.1-250.3".to_string(),
//!     category: "Diabetes".to_string(),
//! };
//!
//! assert!(row.is_icd());
//! assert_eq!(CodeType::normalize(&row.code_type), CodeType::Icd9);
//! assert_eq!(EntryKind::of("250.1-250.3"), EntryKind::Range);
//! assert_eq!(well_known::RANGE_HIGH_FILLER, 'Z');
//! ```

#![warn(missing_docs)]

mod code_type;
mod entry;
mod row;
mod rule;
pub mod well_known;

// Re-export all public types at crate root
pub use code_type::{is_icd, CodeType};
pub use entry::{AtomicEntry, EntryKind};
pub use row::CodeListRow;
pub use rule::{PatternRule, RangeRule, RuleSet, TagRule};
