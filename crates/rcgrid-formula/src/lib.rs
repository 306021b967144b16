//! # rcgrid-formula
//!
//! Expression tokenizer and evaluator for rcgrid.
//!
//! This crate provides:
//! - Lexical analysis of expression text ([`Tokenizer`])
//! - Decoding of `R<row>C<col>` cell references, absolute and `[relative]` ([`CellReference`])
//! - A recursive-descent evaluator that computes the value while parsing ([`ExpressionParser`])
//! - Memoized, cycle-safe resolution of referenced cells through the [`Table`](rcgrid_core::Table)
//!
//! ## Example
//!
//! ```rust
//! use rcgrid_core::{Coordinates, Table};
//! use rcgrid_formula::evaluate;
//!
//! let mut table = Table::new();
//! table.set(Coordinates::new(0, 0), "10");
//! table.set(Coordinates::new(0, 1), "R[0]C[-1] * 2");
//!
//! let value = evaluate("R0C0 + R0C1", &mut table, Coordinates::new(1, 0)).unwrap();
//! assert_eq!(value, 30.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod parser;
pub mod reference;
pub mod tokenizer;

pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    evaluate, evaluate_all, evaluate_all_with_options, evaluate_with_options, EvaluationOptions,
};
pub use parser::ExpressionParser;
pub use reference::{CellReference, ReferencePart};
pub use tokenizer::{Token, TokenKind, Tokenizer};
