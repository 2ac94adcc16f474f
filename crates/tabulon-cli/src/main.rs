//! tabulon CLI: run query documents against a JSON table catalog.

mod catalog;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use tabulon_core::config::EngineConfig;
use tabulon_core::types::Column;
use tabulon_core::Table;
use tabulon_exec::{Executor, QueryResult};
use tabulon_query::{parse_json_query, parse_yaml_query, QueryDocument};

use crate::catalog::Catalog;

#[derive(Parser)]
#[command(name = "tabulon")]
#[command(about = "In-memory columnar query engine with association traversal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query document against one table of a catalog
    Run {
        /// Path to the JSON table catalog
        #[arg(short, long)]
        catalog: PathBuf,

        /// Name of the table to query
        #[arg(short, long)]
        table: String,

        /// Path to the query document (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        query: PathBuf,

        /// Longest pointer path allowed (overrides env and document)
        #[arg(long)]
        max_pointer_depth: Option<usize>,

        /// Largest conjunction allowed (overrides env and document)
        #[arg(long)]
        max_criteria: Option<usize>,

        /// Include match statistics in the output
        #[arg(long)]
        stats: bool,
    },

    /// Validate a query document (syntax and literal types)
    Validate {
        /// Path to the query document
        #[arg(short, long)]
        query: PathBuf,
    },

    /// Show the compiled query; with a catalog, also check it against a table
    Explain {
        /// Path to the query document
        #[arg(short, long)]
        query: PathBuf,

        /// Path to the JSON table catalog
        #[arg(short, long, requires = "table")]
        catalog: Option<PathBuf>,

        /// Name of the table to check against
        #[arg(short, long, requires = "catalog")]
        table: Option<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            catalog,
            table,
            query,
            max_pointer_depth,
            max_criteria,
            stats,
        } => {
            let overrides = CliOverrides {
                max_pointer_depth,
                max_criteria,
            };
            let outcome = run_query(
                &catalog,
                &table,
                &query,
                &overrides,
                stats,
                &mut io::stdout().lock(),
            );
            if let Err(e) = &outcome {
                eprintln!("Error: {}", e);
            }
            let code = exit_code(&outcome);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Validate { query } => {
            if let Err(e) = validate_query(&query) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Query is valid");
        }
        Commands::Explain {
            query,
            catalog,
            table,
        } => {
            let target = catalog.as_deref().zip(table.as_deref());
            if let Err(e) = explain_query(&query, target, &mut io::stdout().lock()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Default)]
struct CliOverrides {
    max_pointer_depth: Option<usize>,
    max_criteria: Option<usize>,
}

/// Env defaults, then the document's `config:` block, then CLI flags.
fn resolve_config(doc: &QueryDocument, cli: &CliOverrides) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    if let Some(overrides) = &doc.config {
        config.apply(overrides);
    }
    if let Some(depth) = cli.max_pointer_depth {
        config.max_pointer_depth = depth;
    }
    if let Some(max) = cli.max_criteria {
        config.max_criteria = max;
    }
    config
}

fn load_document(path: &Path) -> CliResult<QueryDocument> {
    let src = fs::read_to_string(path)?;
    let doc = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_query(&src)?,
        _ => parse_yaml_query(&src)?,
    };
    Ok(doc)
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// 0 on success, 2 when the query ran but produced a `Failure`, 1 otherwise.
fn exit_code(outcome: &CliResult<bool>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(_) => 1,
    }
}

/// Returns `Ok(false)` when the query ran but produced a `Failure`.
fn run_query(
    catalog_path: &Path,
    table_name: &str,
    query_path: &Path,
    overrides: &CliOverrides,
    with_stats: bool,
    out: &mut impl Write,
) -> CliResult<bool> {
    let doc = load_document(query_path)?;
    let query = doc.compile()?;
    let catalog = Catalog::load(catalog_path)?;
    let table = catalog.table(table_name)?;

    let executor = Executor::new(resolve_config(&doc, overrides));
    let (result, stats) = executor.run_with_stats(&query, table);
    tracing::info!(
        table = table_name,
        rows_scanned = stats.rows_scanned,
        rows_matched = stats.rows_matched,
        elapsed_us = stats.elapsed_micros,
        "query finished"
    );

    let mut report = match &result {
        QueryResult::Success(t) => json!({ "status": "success", "table": render_table(t) }),
        QueryResult::Failure(msg) => json!({ "status": "failure", "message": msg }),
    };
    if with_stats {
        report["stats"] = serde_json::to_value(stats)?;
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(result.is_success())
}

fn validate_query(query_path: &Path) -> CliResult<()> {
    let doc = load_document(query_path)?;
    let _ = doc.compile()?;
    Ok(())
}

fn explain_query(
    query_path: &Path,
    target: Option<(&Path, &str)>,
    out: &mut impl Write,
) -> CliResult<()> {
    let doc = load_document(query_path)?;
    let query = doc.compile()?;
    let config = resolve_config(&doc, &CliOverrides::default());

    writeln!(out, "Query Plan")?;
    writeln!(out, "==========")?;
    writeln!(out)?;
    writeln!(out, "Kind: {}", query.kind())?;
    writeln!(out, "Criteria: {}", query.criteria_count())?;
    writeln!(
        out,
        "Max Pointer Depth: {} (limit {})",
        query.max_pointer_depth(),
        config.max_pointer_depth
    )?;
    writeln!(out)?;
    writeln!(out, "Predicates (ANDed):")?;
    for (i, line) in query.describe().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, line)?;
    }

    if let Some((catalog_path, table_name)) = target {
        let catalog = Catalog::load(catalog_path)?;
        let table = catalog.table(table_name)?;
        writeln!(out)?;
        match query.validate(table) {
            Ok(()) => writeln!(
                out,
                "✓ Valid against '{}' ({} rows)",
                table_name,
                table.row_count()
            )?,
            Err(e) => writeln!(out, "✗ Invalid against '{}': {}", table_name, e)?,
        }
    }
    Ok(())
}

fn render_table(table: &Table) -> Value {
    let columns: Vec<Value> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let values = match col {
                Column::Integer(v) => json!(v),
                Column::String(v) => json!(v),
            };
            json!({
                "name": table.column_name(i),
                "type": col.data_type(),
                "values": values,
            })
        })
        .collect();
    json!({ "rows": table.row_count(), "columns": columns })
}
