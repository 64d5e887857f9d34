//! Command-line arguments for the `codeflags` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use codeflags_tagger::codeflags_compiler::codeflags_types::well_known::DEFAULT_CATEGORY_COLUMN;
use codeflags_tagger::codeflags_compiler::CodeListConfig;

#[derive(Parser)]
#[command(
    name = "codeflags",
    version,
    about = "Compile ICD code lists into tagging rules and apply them to datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a code list and print or export its rules.
    Compile(CompileArgs),

    /// Render the warehouse SQL script that tags a table.
    Sql(SqlArgs),

    /// Tag a delimited dataset file in memory.
    Tag(TagArgs),
}

/// Options shared by every command that reads a code list.
#[derive(Args)]
pub struct CodeListArgs {
    /// Code list exported from the spreadsheet as delimited text.
    #[arg(value_name = "CODE_LIST")]
    pub code_list: PathBuf,

    /// Column of the code list holding the category label.
    #[arg(
        long = "category-column",
        env = "CODEFLAGS_CATEGORY_COLUMN",
        default_value = DEFAULT_CATEGORY_COLUMN
    )]
    pub category_column: String,

    /// Field delimiter of the code list (a single character, or "tab").
    #[arg(
        long = "delimiter",
        env = "CODEFLAGS_DELIMITER",
        default_value = ",",
        value_parser = parse_delimiter
    )]
    pub delimiter: u8,
}

impl CodeListArgs {
    pub fn config(&self) -> CodeListConfig {
        CodeListConfig {
            category_column: self.category_column.clone(),
            delimiter: self.delimiter,
            ..Default::default()
        }
    }
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub code_list: CodeListArgs,

    /// Print the rule set as JSON instead of a summary.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the exploded entry table to this CSV file.
    #[arg(long = "entries-out", value_name = "PATH")]
    pub entries_out: Option<PathBuf>,

    /// Write the grouped pattern table to this CSV file.
    #[arg(long = "patterns-out", value_name = "PATH")]
    pub patterns_out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SqlArgs {
    #[command(flatten)]
    pub code_list: CodeListArgs,

    /// Fully qualified input table.
    #[arg(long = "indata", value_name = "TABLE")]
    pub indata: String,

    /// Fully qualified output table (replaced if it exists).
    #[arg(long = "outdata", value_name = "TABLE")]
    pub outdata: String,

    /// Input column holding diagnosis codes.
    #[arg(long = "code-column", default_value = "dx")]
    pub code_column: String,

    /// Input column holding the code type.
    #[arg(long = "code-type-column", default_value = "dx_type")]
    pub code_type_column: String,

    /// Extra conditions for every rule, starting with AND.
    #[arg(long = "where", value_name = "SQL")]
    pub extra_where: Option<String>,

    /// Write the script here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TagArgs {
    #[command(flatten)]
    pub code_list: CodeListArgs,

    /// Dataset to tag, with a header row.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Dataset column holding diagnosis codes.
    #[arg(long = "code-column", default_value = "dx")]
    pub code_column: String,

    /// Dataset column holding the code type.
    #[arg(long = "code-type-column", default_value = "dx_type")]
    pub code_type_column: String,

    /// Only tag rows where COLUMN equals VALUE (repeatable).
    #[arg(long = "filter", value_name = "COLUMN=VALUE")]
    pub filters: Vec<String>,

    /// Write the tagged rows here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!("delimiter must be one ASCII character, got '{value}'")),
            }
        }
    }
}
