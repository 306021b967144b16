//! Expression evaluation entry points and cell resolution
//!
//! Resolving a referenced cell goes through the table's evaluation state:
//!
//! 1. `Evaluating` means the reference chain came back to a cell that is still
//!    being computed: circular reference.
//! 2. `Evaluated` returns the cached value.
//! 3. Otherwise the cell is marked `Evaluating` and its expression evaluated in
//!    its own position. If the result equals the cell's current cached value the
//!    cell returns to `Unvisited` and the cache is left alone, so it is computed
//!    again on the next reference. Otherwise the result is cached and the cell
//!    becomes `Evaluated`.

use log::{debug, trace};
use rcgrid_core::{Coordinates, Table};

use crate::error::{FormulaError, FormulaResult};
use crate::parser::ExpressionParser;

/// Options for expression evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Maximum nesting of parentheses, `if`, unary operators and cell references,
    /// counted across the whole chain of referenced cells (default: 128)
    pub max_depth: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Evaluate an expression as if it were stored at `coords` in `table`
///
/// Referenced cells are evaluated on demand and their values cached on the table.
///
/// # Example
/// ```rust
/// use rcgrid_core::{Coordinates, Table};
/// use rcgrid_formula::evaluate;
///
/// let mut table = Table::new();
/// assert_eq!(evaluate("if(2 > 1, 10, 20)", &mut table, Coordinates::origin()).unwrap(), 10.0);
/// ```
pub fn evaluate(expression: &str, table: &mut Table, coords: Coordinates) -> FormulaResult<f64> {
    evaluate_with_options(expression, table, coords, &EvaluationOptions::default())
}

/// Evaluate an expression with custom options
pub fn evaluate_with_options(
    expression: &str,
    table: &mut Table,
    coords: Coordinates,
    options: &EvaluationOptions,
) -> FormulaResult<f64> {
    ExpressionParser::new(expression, table, coords, *options, 0)?.parse()
}

/// Evaluate every non-empty cell in row-major order and store each result as
/// its cached value
///
/// Stops at the first failing cell. Returns the number of cells evaluated.
pub fn evaluate_all(table: &mut Table) -> FormulaResult<usize> {
    evaluate_all_with_options(table, &EvaluationOptions::default())
}

/// [`evaluate_all`] with custom options
pub fn evaluate_all_with_options(
    table: &mut Table,
    options: &EvaluationOptions,
) -> FormulaResult<usize> {
    let cells: Vec<(Coordinates, String)> = table
        .iter()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(coords, cell)| (coords, cell.expression.clone()))
        .collect();

    for (coords, expression) in &cells {
        let value = evaluate_with_options(expression, table, *coords, options)?;
        table.set_cached_value(*coords, value)?;
    }

    debug!("evaluated {} cells", cells.len());
    Ok(cells.len())
}

/// Current value of the cell at `target`, evaluating it if needed
pub(crate) fn cell_value(
    table: &mut Table,
    target: Coordinates,
    options: &EvaluationOptions,
    depth: usize,
) -> FormulaResult<f64> {
    if table.is_being_evaluated(target) {
        return Err(FormulaError::CircularReference(target));
    }

    if table.is_evaluated(target) {
        trace!("{} cached", target);
        return Ok(table.cached_value(target)?);
    }

    if depth >= options.max_depth {
        return Err(FormulaError::DepthLimitExceeded(options.max_depth));
    }

    let expression = table.get(target)?.to_owned();
    table.mark_evaluating(target);

    let computed = match ExpressionParser::new(&expression, table, target, *options, depth + 1)
        .and_then(ExpressionParser::parse)
    {
        Ok(value) => value,
        Err(e) => {
            table.clear_evaluation_state(target);
            return Err(e);
        }
    };

    if table.cached_value(target)? == computed {
        table.clear_evaluation_state(target);
        return Ok(computed);
    }

    table.mark_evaluated(target);
    table.set_cached_value(target, computed)?;
    Ok(computed)
}
