//! Error types for rcgrid-core

use crate::coordinates::Coordinates;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rcgrid-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No cell has ever been set at the coordinates
    #[error("No cell at {0}")]
    MissingCell(Coordinates),

    /// Range corners are inverted (the right corner lies above or left of the left one)
    #[error("Invalid range {from}..{to}: corners are inverted")]
    InvertedRange { from: Coordinates, to: Coordinates },
}
