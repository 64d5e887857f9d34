//! # codeflags-tagger
//!
//! Applies compiled code-list rules to clinical datasets.
//!
//! Every rule selects the rows whose code matches it and whose code-type
//! column contains the rule's code type, and appends three tag columns
//! (`MAP_CODE`, `MAP_CODE_TYPE`, `MAP_DESCR`). Two backends are provided:
//!
//! - [`SqlApplicator`] renders one `INSERT ... SELECT` per rule and runs it
//!   through a [`StatementExecutor`] (a warehouse cursor, or a
//!   [`ScriptWriter`] that just writes the script).
//! - [`tag_dataset`] tags a delimited file held in memory.
//!
//! Either way each rule is an independent unit of work: a failing rule is
//! recorded in the [`TaggingReport`] and the others still run.

#![warn(missing_docs)]

mod applicator;
mod dataset;
mod error;
mod predicate;
mod report;
pub mod sql;

pub use applicator::{ScriptWriter, SqlApplicator, StatementExecutor};
pub use dataset::{parse_filter, tag_dataset, Dataset, TagConfig, TaggedDataset};
pub use error::{TagError, TagResult};
pub use predicate::RuleMatcher;
pub use report::{RuleOutcome, TaggingReport};
pub use sql::SqlConfig;

// Re-export the compiler for convenience
pub use codeflags_compiler;
