//! rcgrid CLI - load, evaluate and save R1C1 tables

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, LevelFilter};
use rcgrid::prelude::*;
use rcgrid::{
    evaluate, render_all_expressions, render_all_values, render_expressions, render_values, Area,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rcgrid")]
#[command(author, version, about = "Evaluate tables of R1C1 expressions")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the expressions or values of a table
    Show {
        /// Table file
        input: PathBuf,

        /// Calculate and print values instead of expressions
        #[arg(long)]
        values: bool,

        /// Only print from the origin to the larger corner of ROW,COL:ROW,COL
        #[arg(short, long, value_parser = parse_area)]
        area: Option<Area>,
    },

    /// Evaluate an expression in the context of a table
    Eval {
        /// Table file
        input: PathBuf,

        /// Expression to evaluate
        expression: String,

        /// Cell the expression is evaluated in, for relative references
        #[arg(long, value_parser = parse_coordinates, default_value = "0,0")]
        at: Coordinates,
    },

    /// Load, calculate, print, save and reload a table
    Run {
        /// Table file
        input: PathBuf,

        /// Save the table here and verify it by reloading
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The run is expected to fail; success is reported as an error
        #[arg(long)]
        expect_failure: bool,

        /// Text printed before the run
        #[arg(short, long)]
        description: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show {
            input,
            values,
            area,
        } => show(&input, values, area),
        Commands::Eval {
            input,
            expression,
            at,
        } => eval(&input, &expression, at),
        Commands::Run {
            input,
            output,
            expect_failure,
            description,
        } => {
            if let Some(description) = description {
                println!("=== {} ===", description);
            }
            let result = run(&input, output.as_deref());
            match (result, expect_failure) {
                (Ok(()), false) => Ok(()),
                (Err(e), true) => {
                    println!("Failed as expected: {:#}", e);
                    Ok(())
                }
                (Ok(()), true) => {
                    bail!("Expected '{}' to fail, but it succeeded", input.display())
                }
                (Err(e), false) => Err(e),
            }
        }
    }
}

/// Default to warnings; each `-v` raises the level, `RUST_LOG` overrides it
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn open(input: &Path) -> Result<Table> {
    Table::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show(input: &Path, values: bool, area: Option<Area>) -> Result<()> {
    let mut table = open(input)?;

    if values {
        let stats = table.calculate().context("Failed to calculate table")?;
        info!("calculated {} cells", stats.cells_calculated);
    }

    let text = match (values, area) {
        (true, Some(area)) => render_values(&table, area),
        (true, None) => render_all_values(&table),
        (false, Some(area)) => render_expressions(&table, area),
        (false, None) => render_all_expressions(&table),
    };
    print!("{}", text);
    Ok(())
}

fn eval(input: &Path, expression: &str, at: Coordinates) -> Result<()> {
    let mut table = open(input)?;
    let value = evaluate(expression, &mut table, at)
        .with_context(|| format!("Failed to evaluate '{}' at {}", expression, at))?;
    println!("{}", value);
    Ok(())
}

fn run(input: &Path, output: Option<&Path>) -> Result<()> {
    let mut table = open(input)?;
    println!("Expressions:");
    print!("{}", render_all_expressions(&table));

    let stats = table.calculate().context("Failed to calculate table")?;
    println!("Values ({} cells):", stats.cells_calculated);
    print!("{}", render_all_values(&table));

    let Some(output) = output else {
        return Ok(());
    };

    table
        .save(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("Table saved to {}", output.display());

    let mut reloaded = open(output)?;
    reloaded
        .calculate()
        .context("Failed to calculate reloaded table")?;
    println!("Reloaded values:");
    print!("{}", render_all_values(&reloaded));

    if render_all_values(&reloaded) != render_all_values(&table) {
        bail!("Reloaded table differs from '{}'", input.display());
    }
    Ok(())
}

/// Parse `ROW,COL`
fn parse_coordinates(s: &str) -> std::result::Result<Coordinates, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row '{}': {}", row, e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column '{}': {}", col, e))?;
    Ok(Coordinates::new(row, col))
}

/// Parse `ROW,COL:ROW,COL`
fn parse_area(s: &str) -> std::result::Result<Area, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ROW,COL:ROW,COL, got '{}'", s))?;
    Ok(Area::new(parse_coordinates(from)?, parse_coordinates(to)?))
}
