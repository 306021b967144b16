//! Table calculation pass
//!
//! Evaluates every populated cell in row-major order and stores each result as
//! the cell's cached value. Cells referenced along the way are resolved through
//! the table's memo, so shared dependencies are computed once per pass.
//!
//! # Example
//!
//! ```rust
//! use rcgrid::prelude::*;
//!
//! let mut table = Table::new();
//! table.set(Coordinates::new(0, 0), "2");
//! table.set(Coordinates::new(0, 1), "R0C0 * R0C0");
//!
//! let stats = table.calculate().unwrap();
//! println!("Calculated {} cells", stats.cells_calculated);
//! ```

use log::debug;

use crate::{EvaluationOptions, FormulaResult, Table};

/// Options for a table calculation pass
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// Options passed to every evaluation
    pub evaluation: EvaluationOptions,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of cells calculated
    pub cells_calculated: usize,
    /// Number of cells skipped because their expression is empty
    pub empty_cells: usize,
}

/// Extension trait for Table to add calculation methods
pub trait TableCalculationExt {
    /// Calculate all cells with default options
    fn calculate(&mut self) -> FormulaResult<CalculationStats>;

    /// Calculate all cells with custom options
    fn calculate_with_options(
        &mut self,
        options: &CalculationOptions,
    ) -> FormulaResult<CalculationStats>;
}

impl TableCalculationExt for Table {
    fn calculate(&mut self) -> FormulaResult<CalculationStats> {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(
        &mut self,
        options: &CalculationOptions,
    ) -> FormulaResult<CalculationStats> {
        // Values memoized before the pass may predate edits
        self.invalidate_eval_state();

        let cells_calculated =
            rcgrid_formula::evaluate_all_with_options(self, &options.evaluation)?;
        let stats = CalculationStats {
            cells_calculated,
            empty_cells: self.len() - cells_calculated,
        };
        debug!("calculation pass: {:?}", stats);
        Ok(stats)
    }
}
