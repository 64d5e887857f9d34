//! In-memory tagging of delimited datasets.
//!
//! Loads a dataset file, evaluates every rule against it and produces the
//! tagged output: for each rule in order, a copy of each matching row with
//! the three tag columns appended. Rules are evaluated in parallel and each
//! stands alone, so one bad rule is reported without affecting the others.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use codeflags_types::well_known::TAG_COLUMNS;
use codeflags_types::{RuleSet, TagRule};
use csv::{ReaderBuilder, StringRecord};
use rayon::prelude::*;

use crate::error::{TagError, TagResult};
use crate::predicate::RuleMatcher;
use crate::report::{RuleOutcome, TaggingReport};

/// Column names and filters for an in-memory tagging run.
#[derive(Debug, Clone)]
pub struct TagConfig {
    /// Dataset column holding diagnosis codes.
    pub code_column: String,
    /// Dataset column holding the code type.
    pub code_type_column: String,
    /// `(column, value)` equality filters every tagged row must satisfy.
    pub filters: Vec<(String, String)>,
    /// Field delimiter of the dataset and the output.
    pub delimiter: u8,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            code_column: "dx".to_string(),
            code_type_column: "dx_type".to_string(),
            filters: Vec::new(),
            delimiter: b',',
        }
    }
}

/// Parses a `COLUMN=VALUE` filter argument.
pub fn parse_filter(value: &str) -> TagResult<(String, String)> {
    match value.split_once('=') {
        Some((column, expected)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), expected.to_string()))
        }
        _ => Err(TagError::InvalidFilter {
            value: value.to_string(),
        }),
    }
}

/// A dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Dataset {
    /// Reads a dataset with a header row.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> TagResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let rows = csv_reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    /// Reads a dataset file.
    pub fn from_path<P: AsRef<Path>>(path: P, delimiter: u8) -> TagResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TagError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::from_reader(BufReader::new(File::open(path)?), delimiter)
    }

    /// Returns the header row.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, name: &str) -> TagResult<usize> {
        self.headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| TagError::MissingColumn {
                column: name.to_string(),
            })
    }
}

/// Rows produced by a tagging run, with the tag columns appended.
#[derive(Debug, Clone, Default)]
pub struct TaggedDataset {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl TaggedDataset {
    /// Returns the header row, ending with the tag columns.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Returns the tagged rows, grouped by rule in rule-set order.
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Writes the tagged rows as delimited text.
    pub fn write<W: Write>(&self, writer: W, delimiter: u8) -> TagResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Column positions resolved once per run.
struct Columns {
    code: usize,
    code_type: usize,
    filters: Vec<(usize, String)>,
}

/// Tags a dataset with every rule of a rule set.
///
/// A row matching several rules appears once per rule.
///
/// # Errors
/// Fails if the dataset lacks the code, code-type or a filter column. A rule
/// whose expression does not compile is reported in the returned
/// [`TaggingReport`] and contributes no rows.
pub fn tag_dataset(
    dataset: &Dataset,
    rules: &RuleSet,
    config: &TagConfig,
) -> TagResult<(TaggedDataset, TaggingReport)> {
    let columns = Columns {
        code: dataset.column(&config.code_column)?,
        code_type: dataset.column(&config.code_type_column)?,
        filters: config
            .filters
            .iter()
            .map(|(name, value)| dataset.column(name).map(|i| (i, value.clone())))
            .collect::<TagResult<Vec<_>>>()?,
    };

    let per_rule: Vec<(RuleOutcome, Vec<StringRecord>)> = rules
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(index, rule)| apply_rule(index, rule, dataset, &columns))
        .collect();

    let mut headers = dataset.headers.clone();
    for column in TAG_COLUMNS {
        headers.push_field(column);
    }

    let mut tagged = TaggedDataset {
        headers,
        rows: Vec::new(),
    };
    let mut report = TaggingReport::default();
    for (outcome, rows) in per_rule {
        if let Err(message) = &outcome.result {
            tracing::warn!(
                rule = outcome.rule_index,
                "Rule '{}' failed: {}",
                outcome.map_code,
                message
            );
        }
        tagged.rows.extend(rows);
        report.outcomes.push(outcome);
    }

    tracing::info!(
        "Tagged {} rows from {} input rows with {} rules",
        tagged.rows.len(),
        dataset.len(),
        rules.len()
    );
    Ok((tagged, report))
}

fn apply_rule(
    index: usize,
    rule: &TagRule,
    dataset: &Dataset,
    columns: &Columns,
) -> (RuleOutcome, Vec<StringRecord>) {
    let matcher = match RuleMatcher::new(rule) {
        Ok(matcher) => matcher,
        Err(e) => return (RuleOutcome::new(index, rule, 1, Err(e.to_string())), Vec::new()),
    };

    let tags = [rule.map_code(), rule.code_type().as_str(), rule.category()];
    let rows: Vec<StringRecord> = dataset
        .rows
        .iter()
        .filter(|row| {
            columns
                .filters
                .iter()
                .all(|(i, expected)| row.get(*i) == Some(expected.as_str()))
        })
        .filter(|row| {
            matcher.matches(
                row.get(columns.code).unwrap_or(""),
                row.get(columns.code_type).unwrap_or(""),
            )
        })
        .map(|row| {
            let mut tagged = row.clone();
            for tag in tags {
                tagged.push_field(tag);
            }
            tagged
        })
        .collect();

    (RuleOutcome::new(index, rule, 1, Ok(rows.len())), rows)
}
