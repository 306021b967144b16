//! Prelude module - common imports for rcgrid users
//!
//! ```rust
//! use rcgrid::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationStats,
    // Cell types
    Cell,
    Coordinates,
    // Error types
    Error,
    EvalState,
    FormulaError,
    FormulaResult,
    Result,
    StoreError,
    // Main types
    Table,
    // Extension traits
    TableCalculationExt,
    TableExt,
    // I/O types
    TableReader,
    TableWriter,
};
