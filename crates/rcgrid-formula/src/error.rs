//! Formula error types

use rcgrid_core::Coordinates;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while tokenizing or evaluating an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Unexpected character or malformed cell reference
    #[error("Lexical error at offset {position}: {message}")]
    Lexical { position: usize, message: String },

    /// Unexpected token at a grammar position
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Right operand of `/` is zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Reference to coordinates holding no cell
    #[error("Reference to missing cell {0}")]
    MissingReference(Coordinates),

    /// Relative reference whose target does not fit in the coordinate range
    #[error("Reference {reference} from cell {origin} is out of range")]
    ReferenceOutOfRange {
        reference: String,
        origin: Coordinates,
    },

    /// Reference chain leads back to a cell that is still being evaluated
    #[error("Circular reference detected involving cell {0}")]
    CircularReference(Coordinates),

    /// Nesting of subexpressions and referenced cells is deeper than the configured limit
    #[error("Expression nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// Table access error
    #[error("Table error: {0}")]
    Table(#[from] rcgrid_core::Error),
}

impl FormulaError {
    pub(crate) fn lexical<S: Into<String>>(position: usize, message: S) -> Self {
        FormulaError::Lexical {
            position,
            message: message.into(),
        }
    }
}
