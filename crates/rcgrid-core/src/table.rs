//! Sparse cell table
//!
//! Cells live in a hash map keyed by [`Coordinates`]; only coordinates that were
//! written at least once are present. Evaluation state is tracked in a second map
//! so that it can be reset in bulk without touching the stored expressions.

use ahash::AHashMap;
use log::trace;

use crate::cell::{Cell, EvalState};
use crate::coordinates::{Area, Coordinates};
use crate::error::{Error, Result};

/// Map of every populated coordinate to its cell
pub type CellMap = AHashMap<Coordinates, Cell>;

/// A sparse two-dimensional table of expression cells
///
/// Besides the cells themselves the table owns:
/// - a focus cursor, moved by [`Table::set`]
/// - the per-coordinate [`EvalState`] used by the evaluator for memoization and
///   circular reference detection
#[derive(Debug, Clone, Default)]
pub struct Table {
    cells: CellMap,
    focus: Coordinates,
    eval_states: AHashMap<Coordinates, EvalState>,
}

impl Table {
    /// Create a new empty table with the focus at the origin
    pub fn new() -> Self {
        Self::default()
    }

    // === Storage ===

    /// Write an expression and return the coordinates that were written
    ///
    /// If either component of `coords` is negative the call is a relative move:
    /// `coords` is added to the current focus. Otherwise the focus jumps to
    /// `coords`. The expression is then stored at the new focus, replacing any
    /// previous cell there (its cached value is reset to `0.0`).
    pub fn set<S: Into<String>>(&mut self, coords: Coordinates, expression: S) -> Coordinates {
        self.focus = if coords.is_negative() {
            self.focus.saturating_offset(coords)
        } else {
            coords
        };

        let target = self.focus;
        let cell = Cell::new(expression);
        trace!("set {} = {:?}", target, cell.expression);
        self.cells.insert(target, cell);
        target
    }

    /// Get the expression stored at `coords`
    pub fn get(&self, coords: Coordinates) -> Result<&str> {
        self.cell(coords).map(|cell| cell.expression.as_str())
    }

    /// Get the cell stored at `coords`
    pub fn cell(&self, coords: Coordinates) -> Result<&Cell> {
        self.cells.get(&coords).ok_or(Error::MissingCell(coords))
    }

    /// Whether a cell was ever set at `coords`
    pub fn contains(&self, coords: Coordinates) -> bool {
        self.cells.contains_key(&coords)
    }

    /// Read-only access to all stored cells
    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinates, &Cell)> + '_ {
        let mut keys: Vec<Coordinates> = self.cells.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(move |coords| self.cells.get(&coords).map(|cell| (coords, cell)))
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell was ever set
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current focus cursor
    pub fn focus(&self) -> Coordinates {
        self.focus
    }

    /// Rectangle from the origin to the largest occupied row and column
    ///
    /// Both maxima start at zero, so an empty table (or one holding only
    /// negative coordinates) yields the single-cell area at the origin.
    pub fn bounds(&self) -> Area {
        let (max_row, max_col) = self
            .cells
            .keys()
            .fold((0, 0), |(row, col), c| (row.max(c.row), col.max(c.col)));
        Area::to(Coordinates::new(max_row, max_col))
    }

    // === Cached values ===

    /// Get the cached value at `coords` without evaluating anything
    pub fn cached_value(&self, coords: Coordinates) -> Result<f64> {
        self.cell(coords).map(|cell| cell.cached_value)
    }

    /// Overwrite the cached value at `coords`
    pub fn set_cached_value(&mut self, coords: Coordinates, value: f64) -> Result<()> {
        let cell = self
            .cells
            .get_mut(&coords)
            .ok_or(Error::MissingCell(coords))?;
        cell.cached_value = value;
        Ok(())
    }

    // === Evaluation state ===

    /// Evaluation state of `coords` (`Unvisited` if never touched)
    pub fn eval_state(&self, coords: Coordinates) -> EvalState {
        self.eval_states.get(&coords).copied().unwrap_or_default()
    }

    /// Whether `coords` is part of the evaluation chain currently running
    pub fn is_being_evaluated(&self, coords: Coordinates) -> bool {
        self.eval_state(coords) == EvalState::Evaluating
    }

    /// Whether `coords` holds a memoized value
    pub fn is_evaluated(&self, coords: Coordinates) -> bool {
        self.eval_state(coords) == EvalState::Evaluated
    }

    /// Enter `Evaluating`
    pub fn mark_evaluating(&mut self, coords: Coordinates) {
        trace!("{} -> evaluating", coords);
        self.eval_states.insert(coords, EvalState::Evaluating);
    }

    /// Enter `Evaluated`
    pub fn mark_evaluated(&mut self, coords: Coordinates) {
        trace!("{} -> evaluated", coords);
        self.eval_states.insert(coords, EvalState::Evaluated);
    }

    /// Return a single coordinate to `Unvisited`
    ///
    /// Building block for finer-grained invalidation; nothing calls it
    /// automatically when a cell is edited.
    pub fn clear_evaluation_state(&mut self, coords: Coordinates) {
        self.eval_states.remove(&coords);
    }

    /// Return every coordinate to `Unvisited`, discarding all memoization
    pub fn invalidate_eval_state(&mut self) {
        trace!("invalidating {} eval states", self.eval_states.len());
        self.eval_states.clear();
    }

    // === Range aggregates ===
    //
    // `count` scans the half-open rectangle. `sum`, `min`, `max` and `avg` only
    // combine the cached values at the two corners.

    /// Sum of the cached values at the two corners
    pub fn sum(&self, left: Coordinates, right: Coordinates) -> Result<f64> {
        let (l, r) = self.corner_values(left, right)?;
        Ok(l + r)
    }

    /// Number of non-empty cells with `left.row <= row < right.row` and
    /// `left.col <= col < right.col`
    ///
    /// Coordinates that hold no cell count as empty rather than being an error,
    /// unlike the corner lookups of [`Table::sum`] and friends.
    pub fn count(&self, left: Coordinates, right: Coordinates) -> Result<usize> {
        if right.row < left.row || right.col < left.col {
            return Err(Error::InvertedRange {
                from: left,
                to: right,
            });
        }

        let mut counter = 0;
        for row in left.row..right.row {
            for col in left.col..right.col {
                if let Some(cell) = self.cells.get(&Coordinates::new(row, col)) {
                    if !cell.is_empty() {
                        counter += 1;
                    }
                }
            }
        }
        Ok(counter)
    }

    /// Smaller of the cached values at the two corners
    pub fn min(&self, left: Coordinates, right: Coordinates) -> Result<f64> {
        let (l, r) = self.corner_values(left, right)?;
        Ok(if l < r { l } else { r })
    }

    /// Larger of the cached values at the two corners
    pub fn max(&self, left: Coordinates, right: Coordinates) -> Result<f64> {
        let (l, r) = self.corner_values(left, right)?;
        Ok(if l > r { l } else { r })
    }

    /// Mean of the cached values at the two corners
    pub fn avg(&self, left: Coordinates, right: Coordinates) -> Result<f64> {
        let (l, r) = self.corner_values(left, right)?;
        Ok((l + r) / 2.0)
    }

    fn corner_values(&self, left: Coordinates, right: Coordinates) -> Result<(f64, f64)> {
        Ok((self.cached_value(left)?, self.cached_value(right)?))
    }
}
