//! cellflow CLI - evaluate sheets of formulas from the command line

use anyhow::{Context, Result};
use cellflow::prelude::*;
use cellflow::{try_parse, DEFAULT_MAX_RANGE_CELLS};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "cellflow")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a sheet file and print cell values
    Eval {
        /// Sheet file: one `CELL FORMULA` per line, `#` starts a comment
        input: PathBuf,

        /// Only print these cells (default: every non-empty cell)
        #[arg(short, long = "cell")]
        cells: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Print the cells that depend on a cell
    Deps {
        /// Sheet file
        input: PathBuf,

        /// Cell to inspect
        cell: String,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Parse a single formula and print its tree
    Parse {
        /// Formula text, e.g. "(ADD A1 2)"
        formula: String,
    },

    /// List the builtin functions
    Functions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
struct GraphArgs {
    /// Record failed updates as error values instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Largest range, in cells, a formula may reference
    #[arg(long, default_value_t = DEFAULT_MAX_RANGE_CELLS)]
    max_range_cells: u64,
}

impl GraphArgs {
    fn options(&self) -> GraphOptions {
        GraphOptions::new()
            .with_surface_update_failures(self.strict)
            .with_max_range_cells(self.max_range_cells)
    }
}

#[derive(Serialize)]
struct CellOutput<'a> {
    cell: &'a str,
    value: &'a Value,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            input,
            cells,
            format,
            graph,
        } => eval(&input, &cells, format, graph.options()),
        Commands::Deps { input, cell, graph } => show_dependents(&input, &cell, graph.options()),
        Commands::Parse { formula } => show_parse(&formula),
        Commands::Functions => list_functions(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn eval(input: &Path, cells: &[String], format: OutputFormat, options: GraphOptions) -> Result<()> {
    let graph = load_graph(input, options)?;

    let mut selected: Vec<&str> = if cells.is_empty() {
        graph.cells()
    } else {
        cells.iter().map(String::as_str).collect()
    };
    sort_by_address(&mut selected);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for cell in &selected {
                writeln!(out, "{}\t{}", cell, display_value(graph.value_of_cell(cell)))
                    .context("Failed to write to stdout")?;
            }
        }
        OutputFormat::Json => {
            let rows: Vec<CellOutput<'_>> = selected
                .iter()
                .map(|cell| CellOutput {
                    cell: *cell,
                    value: graph.value_of_cell(cell),
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &rows).context("Failed to write JSON")?;
            writeln!(out).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn show_dependents(input: &Path, cell: &str, options: GraphOptions) -> Result<()> {
    let graph = load_graph(input, options)?;

    let mut dependents = graph.cells_dependent_on(cell);
    sort_by_address(&mut dependents);
    for dependent in dependents {
        println!("{}", dependent);
    }

    Ok(())
}

fn show_parse(formula: &str) -> Result<()> {
    let equation =
        try_parse(formula).with_context(|| format!("Failed to parse '{}'", formula))?;

    match equation {
        Some(equation) => {
            println!("{:#?}", equation);
            println!("{}", equation);
        }
        None => println!("(empty)"),
    }

    Ok(())
}

fn list_functions() -> Result<()> {
    for name in FunctionRegistry::builtin().names() {
        println!("{}", name);
    }
    Ok(())
}

fn load_graph(input: &Path, options: GraphOptions) -> Result<DependencyGraph> {
    let updates = read_sheet(input)?;
    tracing::info!(path = %input.display(), cells = updates.len(), "loaded sheet");

    let mut graph = DependencyGraph::with_options(FunctionRegistry::builtin(), options);
    graph.update_cells(updates);
    Ok(graph)
}

fn read_sheet(input: &Path) -> Result<Vec<(String, String)>> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    Ok(parse_sheet(&text))
}

/// Split sheet text into `(cell, formula)` updates in file order
///
/// A line holding only a cell name clears that cell.
fn parse_sheet(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((cell, formula)) => (cell.to_string(), formula.trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

/// Cell addresses first in row-major order, then any other keys by name
fn sort_by_address(cells: &mut [&str]) {
    cells.sort_by(|a, b| {
        let key = |cell: &str| CellAddress::parse(cell).ok();
        match (key(*a), key(*b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Error { message } => format!("#ERROR: {}", message),
        other => other.to_string(),
    }
}
