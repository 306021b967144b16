//! # rcgrid
//!
//! A sparse table of cells addressed by `(row, column)`, whose expressions are
//! evaluated on demand.
//!
//! Expressions support numbers, `+ - * / %`, comparisons (`== != < >`),
//! `and`/`or`/`not`, `if(cond, a, b)` and cell references in R1C1 notation:
//! `R2C3` names an absolute cell while `R[-1]C[0]` is relative to the cell whose
//! expression contains it. Referenced cells are evaluated recursively, their
//! results cached on the table, and circular references reported as errors.
//!
//! ## Example
//!
//! ```rust
//! use rcgrid::prelude::*;
//!
//! let mut table = Table::new();
//! table.set(Coordinates::new(0, 0), "10");
//! table.set(Coordinates::new(0, 1), "20");
//! table.set(Coordinates::new(1, 0), "R[-1]C[0] + R[-1]C[1]");
//!
//! let stats = table.calculate().unwrap();
//! assert_eq!(stats.cells_calculated, 3);
//! assert_eq!(table.cached_value(Coordinates::new(1, 0)).unwrap(), 30.0);
//! ```
//!
//! Tables are stored as `;`-separated text, one row per line:
//!
//! ```rust,no_run
//! use rcgrid::prelude::*;
//!
//! let mut table = Table::open("input.csv").unwrap();
//! table.calculate().unwrap();
//! table.save("output.csv").unwrap();
//! ```

pub mod calculation;
pub mod display;
pub mod prelude;

// Re-export calculation types
pub use calculation::{CalculationOptions, CalculationStats, TableCalculationExt};

// Re-export rendering
pub use display::{render_all_expressions, render_all_values, render_expressions, render_values};

// Re-export core types
pub use rcgrid_core::{Area, Cell, CellMap, Coordinates, Error, EvalState, Result, Table};

// Re-export formula types
pub use rcgrid_formula::{
    evaluate, evaluate_all, evaluate_with_options, CellReference, EvaluationOptions,
    FormulaError, FormulaResult, Token, TokenKind, Tokenizer,
};

// Re-export I/O types
pub use rcgrid_csv::{
    LineTerminator, ReadOptions, StoreError, StoreResult, TableReader, TableWriter, WriteOptions,
};

use std::path::Path;

/// Extension trait for Table to add file I/O
pub trait TableExt {
    /// Open a table from a file
    fn open<P: AsRef<Path>>(path: P) -> StoreResult<Table>;

    /// Save the table's expressions to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> StoreResult<()>;
}

impl TableExt for Table {
    fn open<P: AsRef<Path>>(path: P) -> StoreResult<Table> {
        TableReader::load_file(path)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> StoreResult<()> {
        TableWriter::write_file(self, path, &WriteOptions::default())
    }
}
