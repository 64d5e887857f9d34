//! Warehouse tagging applicator.
//!
//! Issues the rendered statements through a [`StatementExecutor`], one
//! independent statement per rule. A failing rule is retried, then recorded
//! in the report; the remaining rules still run.

use std::io::Write;

use codeflags_types::RuleSet;

use crate::error::{TagError, TagResult};
use crate::report::{RuleOutcome, TaggingReport};
use crate::sql::{insert_statement, setup_statements, SqlConfig};

/// Something that can run SQL statements, such as a warehouse cursor.
pub trait StatementExecutor {
    /// Error returned by a failed statement.
    type Error: std::fmt::Display;

    /// Runs one statement and returns the number of rows it affected.
    fn execute(&mut self, statement: &str) -> Result<usize, Self::Error>;
}

/// Executor that writes statements to a script instead of running them.
///
/// Each statement is terminated with `;` and a blank line. Affected row
/// counts are always zero.
pub struct ScriptWriter<W: Write> {
    out: W,
}

impl<W: Write> ScriptWriter<W> {
    /// Creates a script writer over any output.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatementExecutor for ScriptWriter<W> {
    type Error = std::io::Error;

    fn execute(&mut self, statement: &str) -> Result<usize, Self::Error> {
        writeln!(self.out, "{statement};\n")?;
        Ok(0)
    }
}

/// Applies a rule set to a warehouse table through an executor.
pub struct SqlApplicator<E: StatementExecutor> {
    executor: E,
    config: SqlConfig,
}

impl<E: StatementExecutor> SqlApplicator<E> {
    /// Creates an applicator.
    pub fn new(executor: E, config: SqlConfig) -> Self {
        Self { executor, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SqlConfig {
        &self.config
    }

    /// Returns the executor, e.g. to recover a [`ScriptWriter`]'s output.
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Creates the output table, then runs one insert per rule.
    ///
    /// # Errors
    /// Fails only if creating the output table fails. Per-rule failures are
    /// in the returned report.
    pub fn apply(&mut self, rules: &RuleSet) -> TagResult<TaggingReport> {
        for statement in setup_statements(&self.config) {
            self.executor
                .execute(&statement)
                .map_err(|e| TagError::Setup {
                    message: e.to_string(),
                })?;
        }

        let mut report = TaggingReport::default();
        for (index, rule) in rules.iter().enumerate() {
            let statement = insert_statement(rule, &self.config);
            let (attempts, result) = self.execute_with_retry(&statement);

            match &result {
                Ok(rows) => tracing::debug!(rule = index, rows, "Applied rule"),
                Err(message) => tracing::warn!(
                    rule = index,
                    attempts,
                    "Rule '{}' failed: {}",
                    rule.map_code(),
                    message
                ),
            }
            report
                .outcomes
                .push(RuleOutcome::new(index, rule, attempts, result));
        }

        tracing::info!(
            "Applied {} of {} rules to {}",
            report.outcomes.len() - report.failures().count(),
            rules.len(),
            self.config.outdata
        );
        Ok(report)
    }

    fn execute_with_retry(&mut self, statement: &str) -> (u32, Result<usize, String>) {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.executor.execute(statement) {
                Ok(rows) => return (attempt, Ok(rows)),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < max_attempts {
                        tracing::debug!(attempt, "Retrying statement after error: {}", last_error);
                    }
                }
            }
        }

        (max_attempts, Err(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeflags_types::{CodeType, PatternRule, RangeRule, TagRule};

    /// Executor failing the first `fail_times` statements containing `needle`.
    struct FlakyExecutor {
        needle: &'static str,
        fail_times: usize,
        executed: Vec<String>,
    }

    impl StatementExecutor for FlakyExecutor {
        type Error = String;

        fn execute(&mut self, statement: &str) -> Result<usize, Self::Error> {
            if statement.contains(self.needle) && self.fail_times > 0 {
                self.fail_times -= 1;
                return Err("warehouse unavailable".to_string());
            }
            self.executed.push(statement.to_string());
            Ok(5)
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new(vec![
            TagRule::Pattern(PatternRule {
                code_type: CodeType::Icd10,
                category: "Hypertension".to_string(),
                expression: "I10.*".to_string(),
            }),
            TagRule::Range(RangeRule {
                code_type: CodeType::Icd9,
                category: "Neoplasms".to_string(),
                raw: "170-182".to_string(),
                low: "170".to_string(),
                high: "182ZZZZ".to_string(),
            }),
        ])
    }

    fn config(max_attempts: u32) -> SqlConfig {
        SqlConfig {
            indata: "IN_T".to_string(),
            outdata: "OUT_T".to_string(),
            max_attempts,
            ..Default::default()
        }
    }

    #[test]
    fn test_script_writer_renders_all_statements() {
        let mut applicator = SqlApplicator::new(ScriptWriter::new(Vec::new()), config(1));
        let report = applicator.apply(&rules()).unwrap();
        assert!(report.all_applied());

        let script = String::from_utf8(applicator.into_executor().into_inner()).unwrap();
        let statements: Vec<&str> = script.split(";\n").filter(|s| !s.trim().is_empty()).collect();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("CREATE OR REPLACE TABLE OUT_T LIKE IN_T"));
        assert!(statements[2].contains("REGEXP ('I10.*')"));
        assert!(statements[3].contains("BETWEEN '170' AND '182ZZZZ'"));
    }

    #[test]
    fn test_failed_rule_does_not_stop_others() {
        let executor = FlakyExecutor {
            needle: "REGEXP",
            fail_times: 10,
            executed: Vec::new(),
        };
        let mut applicator = SqlApplicator::new(executor, config(3));
        let report = applicator.apply(&rules()).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].attempts, 3);
        assert_eq!(
            report.outcomes[0].result,
            Err("warehouse unavailable".to_string())
        );
        assert_eq!(report.outcomes[1].result, Ok(5));
        assert!(applicator
            .into_executor()
            .executed
            .iter()
            .any(|s| s.contains("BETWEEN")));
    }

    #[test]
    fn test_retry_recovers() {
        let executor = FlakyExecutor {
            needle: "REGEXP",
            fail_times: 1,
            executed: Vec::new(),
        };
        let mut applicator = SqlApplicator::new(executor, config(2));
        let report = applicator.apply(&rules()).unwrap();

        assert!(report.all_applied());
        assert_eq!(report.outcomes[0].attempts, 2);
        assert_eq!(report.rows_tagged(), 10);
    }

    #[test]
    fn test_setup_failure_is_fatal() {
        let executor = FlakyExecutor {
            needle: "CREATE",
            fail_times: 1,
            executed: Vec::new(),
        };
        let mut applicator = SqlApplicator::new(executor, config(1));
        assert!(matches!(
            applicator.apply(&rules()),
            Err(TagError::Setup { .. })
        ));
    }
}
