//! Persistence error types

use thiserror::Error;

/// Result type for table file operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while reading or writing a table file
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
