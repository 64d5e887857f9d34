//! Warehouse SQL rendering.
//!
//! Renders the statements that build a tagged copy of a warehouse table:
//! the output table is created with the input's shape plus the three tag
//! columns, then each rule appends its matching rows. The dialect assumes
//! `REGEXP` anchors at both ends and `contains(column, text)` exists, as in
//! Snowflake.

use codeflags_types::well_known::{MAP_CODE, MAP_CODE_TYPE, MAP_DESCR};
use codeflags_types::TagRule;

/// Table and column names for a warehouse tagging run.
#[derive(Debug, Clone)]
pub struct SqlConfig {
    /// Fully qualified input table (`db.schema.table`).
    pub indata: String,
    /// Fully qualified output table; replaced if it exists.
    pub outdata: String,
    /// Input column holding diagnosis codes.
    pub code_column: String,
    /// Input column holding the code type (9 vs 10).
    pub code_type_column: String,
    /// Extra conditions appended to every rule, starting with `AND`.
    pub extra_where: Option<String>,
    /// Attempts per rule statement before it is reported as failed.
    pub max_attempts: u32,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            indata: String::new(),
            outdata: String::new(),
            code_column: "dx".to_string(),
            code_type_column: "dx_type".to_string(),
            extra_where: None,
            max_attempts: 2,
        }
    }
}

/// Quotes a value as a SQL string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Statements that create the empty output table.
pub fn setup_statements(config: &SqlConfig) -> Vec<String> {
    vec![
        format!(
            "CREATE OR REPLACE TABLE {} LIKE {}",
            config.outdata, config.indata
        ),
        format!(
            "ALTER TABLE {} ADD (\"{MAP_CODE}\" varchar, \"{MAP_CODE_TYPE}\" varchar, \"{MAP_DESCR}\" varchar)",
            config.outdata
        ),
    ]
}

/// The `WHERE` condition selecting rows a rule tags.
pub fn rule_condition(rule: &TagRule, config: &SqlConfig) -> String {
    let code_test = match rule {
        TagRule::Pattern(p) => format!(
            "{} REGEXP ({})",
            config.code_column,
            quote_literal(&p.expression)
        ),
        TagRule::Range(r) => format!(
            "{} BETWEEN {} AND {}",
            config.code_column,
            quote_literal(&r.low),
            quote_literal(&r.high)
        ),
    };

    let mut condition = format!(
        "{code_test} AND contains({}, {})",
        config.code_type_column,
        quote_literal(rule.code_type().as_str())
    );
    if let Some(extra) = config.extra_where.as_deref().filter(|w| !w.trim().is_empty()) {
        condition.push(' ');
        condition.push_str(extra.trim());
    }
    condition
}

/// The statement appending one rule's tagged rows to the output table.
pub fn insert_statement(rule: &TagRule, config: &SqlConfig) -> String {
    format!(
        "INSERT INTO {out} SELECT *, {code} AS {MAP_CODE}, {code_type} AS {MAP_CODE_TYPE}, {descr} AS {MAP_DESCR} FROM {inp} WHERE {condition}",
        out = config.outdata,
        code = quote_literal(rule.map_code()),
        code_type = quote_literal(rule.code_type().as_str()),
        descr = quote_literal(rule.category()),
        inp = config.indata,
        condition = rule_condition(rule, config),
    )
}
