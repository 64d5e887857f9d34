//! Rule set assembly and the end-to-end compile pipeline.
//!
//! ```ignore
//! use codeflags_compiler::{compile_file, CodeListConfig};
//!
//! let compilation = compile_file("codelist.csv", &CodeListConfig::default())?;
//! for rule in &compilation.rule_set {
//!     println!("{} {} {}", rule.code_type(), rule.category(), rule.map_code());
//! }
//! ```

use std::io::Read;
use std::path::Path;

use codeflags_types::{AtomicEntry, CodeListRow, PatternRule, RangeRule, RuleSet, TagRule};

use crate::classify::classify_rows;
use crate::parser::CodeListReader;
use crate::pattern::compile_patterns;
use crate::range::compile_ranges;
use crate::types::{CodeListConfig, CompileError, CompileResult};

/// Concatenates pattern rules and range rules into one rule set.
///
/// Order is kept exactly as given: all patterns, then all ranges.
pub fn build_rule_set(patterns: Vec<PatternRule>, ranges: Vec<RangeRule>) -> RuleSet {
    let rules = patterns
        .into_iter()
        .map(TagRule::Pattern)
        .chain(ranges.into_iter().map(TagRule::Range))
        .collect();
    RuleSet::new(rules)
}

/// Everything produced by compiling a code list.
#[derive(Debug, Default)]
pub struct Compilation {
    /// The rules handed to the tagger.
    pub rule_set: RuleSet,
    /// Every classified entry of every ICD row, in source order.
    pub entries: Vec<AtomicEntry>,
    /// The grouped pattern table (same rules as the pattern part of `rule_set`).
    pub pattern_groups: Vec<PatternRule>,
    /// Entries that could not be turned into rules.
    pub errors: Vec<CompileError>,
    /// Rows seen, ICD or not.
    pub rows_read: usize,
    /// Rows dropped because their code type is not ICD.
    pub rows_excluded: usize,
    /// Empty segments compiled into match-anything patterns.
    pub empty_entries: usize,
}

impl Compilation {
    /// Returns true if any entry failed to compile.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Compiles code-list rows into a rule set.
///
/// Pure: the same rows always give the same `Compilation`. Rows whose code
/// type is not ICD are dropped silently. Malformed ranges are reported in
/// [`Compilation::errors`] without stopping the rest.
pub fn compile(rows: &[CodeListRow]) -> Compilation {
    let icd_rows: Vec<CodeListRow> = rows
        .iter()
        .filter(|row| {
            let keep = row.is_icd();
            if !keep {
                tracing::debug!(row = row.row, code_type = %row.code_type, "Excluding non-ICD row");
            }
            keep
        })
        .cloned()
        .collect();

    let entries = classify_rows(&icd_rows);

    let empty_entries = entries.iter().filter(|e| e.is_empty()).count();
    for entry in entries.iter().filter(|e| e.is_empty()) {
        tracing::warn!(
            row = entry.row,
            position = entry.position,
            "Empty code entry compiles to a match-anything pattern"
        );
    }

    let pattern_groups = compile_patterns(&entries);
    let (ranges, errors) = compile_ranges(&entries);
    let rule_set = build_rule_set(pattern_groups.clone(), ranges);

    tracing::info!(
        "Compiled {} rows into {} pattern rules and {} range rules",
        icd_rows.len(),
        pattern_groups.len(),
        rule_set.len() - pattern_groups.len()
    );

    Compilation {
        rule_set,
        entries,
        pattern_groups,
        errors,
        rows_read: rows.len(),
        rows_excluded: rows.len() - icd_rows.len(),
        empty_entries,
    }
}

/// Reads a code list from any byte source and compiles it.
///
/// # Errors
/// Fails on I/O or CSV errors and on a missing column; per-entry problems
/// are reported in the returned `Compilation` instead.
pub fn compile_reader<R: Read>(reader: R, config: &CodeListConfig) -> CompileResult<Compilation> {
    let rows = CodeListReader::from_reader(reader, config)?.read_all()?;
    Ok(compile(&rows))
}

/// Reads a code-list file and compiles it.
pub fn compile_file<P: AsRef<Path>>(
    path: P,
    config: &CodeListConfig,
) -> CompileResult<Compilation> {
    let path = path.as_ref();
    tracing::info!("Loading code list from: {}", path.display());
    let rows = CodeListReader::from_path(path, config)?.read_all()?;
    Ok(compile(&rows))
}
