//! codeflags command-line binary.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::Parser;
use codeflags_tagger::codeflags_compiler::{audit, compile_file, Compilation};
use codeflags_tagger::{
    parse_filter, tag_dataset, Dataset, ScriptWriter, SqlApplicator, SqlConfig, TagConfig,
    TaggingReport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use crate::cli::{Cli, CodeListArgs, Command, CompileArgs, SqlArgs, TagArgs};

/// Exit status when some code-list entries or rules could not be applied.
const EXIT_PARTIAL: i32 = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let complete = match cli.command {
        Command::Compile(args) => run_compile(&args)?,
        Command::Sql(args) => run_sql(&args)?,
        Command::Tag(args) => run_tag(&args)?,
    };

    if !complete {
        std::process::exit(EXIT_PARTIAL);
    }
    Ok(())
}

/// Loads and compiles the code list, logging every rejected entry.
fn load_rules(args: &CodeListArgs) -> Result<Compilation, Box<dyn std::error::Error>> {
    let compilation = compile_file(&args.code_list, &args.config())?;

    tracing::info!(
        "Read {} rows ({} non-ICD rows excluded), {} entries, {} rules",
        compilation.rows_read,
        compilation.rows_excluded,
        compilation.entries.len(),
        compilation.rule_set.len()
    );
    if compilation.empty_entries > 0 {
        tracing::warn!(
            "{} empty code entries will match every code of their type",
            compilation.empty_entries
        );
    }
    for error in &compilation.errors {
        tracing::error!("{}", error);
    }

    Ok(compilation)
}

/// Opens the output file, or stdout when none is given.
fn output(path: Option<&std::path::Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn log_report(report: &TaggingReport) {
    for failure in report.failures() {
        if let Err(message) = &failure.result {
            tracing::error!(
                "Rule {} ({} / {}) failed after {} attempts: {}",
                failure.rule_index,
                failure.category,
                failure.map_code,
                failure.attempts,
                message
            );
        }
    }
}

fn run_compile(args: &CompileArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let compilation = load_rules(&args.code_list)?;
    let category_column = &args.code_list.category_column;

    if let Some(path) = &args.entries_out {
        audit::write_entry_table_file(path, category_column, &compilation.entries)?;
        tracing::info!("Wrote entry table to {}", path.display());
    }
    if let Some(path) = &args.patterns_out {
        audit::write_pattern_table_file(path, category_column, &compilation.pattern_groups)?;
        tracing::info!("Wrote pattern table to {}", path.display());
    }

    let mut out = output(None)?;
    if args.json {
        serde_json::to_writer_pretty(&mut out, &compilation.rule_set)?;
        writeln!(out)?;
    } else {
        for rule in &compilation.rule_set {
            writeln!(
                out,
                "{}\t{}\t{}",
                rule.code_type(),
                rule.category(),
                rule.map_code()
            )?;
        }
    }
    out.flush()?;

    Ok(!compilation.has_errors())
}

fn run_sql(args: &SqlArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let compilation = load_rules(&args.code_list)?;

    let config = SqlConfig {
        indata: args.indata.clone(),
        outdata: args.outdata.clone(),
        code_column: args.code_column.clone(),
        code_type_column: args.code_type_column.clone(),
        extra_where: args.extra_where.clone(),
        ..Default::default()
    };

    let script = ScriptWriter::new(output(args.output.as_deref())?);
    let mut applicator = SqlApplicator::new(script, config);
    let report = applicator.apply(&compilation.rule_set)?;
    applicator.into_executor().into_inner().flush()?;
    log_report(&report);

    Ok(!compilation.has_errors() && report.all_applied())
}

fn run_tag(args: &TagArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let compilation = load_rules(&args.code_list)?;

    let config = TagConfig {
        code_column: args.code_column.clone(),
        code_type_column: args.code_type_column.clone(),
        filters: args
            .filters
            .iter()
            .map(|f| parse_filter(f))
            .collect::<Result<_, _>>()?,
        delimiter: args.code_list.delimiter,
    };

    tracing::info!("Loading dataset from: {}", args.dataset.display());
    let dataset = Dataset::from_path(&args.dataset, config.delimiter)?;

    let (tagged, report) = tag_dataset(&dataset, &compilation.rule_set, &config)?;
    let mut out = output(args.output.as_deref())?;
    tagged.write(&mut out, config.delimiter)?;
    out.flush()?;
    log_report(&report);

    Ok(!compilation.has_errors() && report.all_applied())
}
