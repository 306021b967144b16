//! Cell and evaluation-state types

/// A single table slot: the stored expression and its last computed value
///
/// `cached_value` starts at `0.0` and is written by evaluation; replacing the
/// cell resets it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Expression text exactly as written
    pub expression: String,
    /// Last computed value
    pub cached_value: f64,
}

impl Cell {
    /// Create a cell holding `expression` with a zeroed cache
    pub fn new<S: Into<String>>(expression: S) -> Self {
        Self {
            expression: expression.into(),
            cached_value: 0.0,
        }
    }

    /// Whether the stored expression is empty
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }
}

/// Evaluation progress of a coordinate
///
/// `Unvisited -> Evaluating -> Evaluated`. A coordinate found in `Evaluating`
/// while resolving a reference means the reference chain loops back on itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalState {
    #[default]
    Unvisited,
    Evaluating,
    Evaluated,
}
