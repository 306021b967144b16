//! # rcgrid-core
//!
//! Core data structures for the rcgrid formula engine.
//!
//! This crate provides the fundamental types used throughout rcgrid:
//! - [`Coordinates`] and [`Area`] - Cell addressing (signed, R1C1 style) and rectangles
//! - [`Cell`] - An expression together with its last computed value
//! - [`EvalState`] - Per-coordinate marker used for memoization and cycle detection
//! - [`Table`] - The sparse cell store with its focus cursor and range aggregates
//!
//! ## Example
//!
//! ```rust
//! use rcgrid_core::{Coordinates, Table};
//!
//! let mut table = Table::new();
//! table.set(Coordinates::new(0, 0), "10");
//! table.set(Coordinates::new(0, 1), "R0C0 * 2");
//!
//! assert_eq!(table.get(Coordinates::new(0, 1)).unwrap(), "R0C0 * 2");
//!
//! // Negative components move the focus cursor instead of jumping
//! let written = table.set(Coordinates::new(-1, 0), "5");
//! assert_eq!(written, Coordinates::new(-1, 1));
//! ```

pub mod cell;
pub mod coordinates;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use cell::{Cell, EvalState};
pub use coordinates::{Area, Coordinates};
pub use error::{Error, Result};
pub use table::{CellMap, Table};
