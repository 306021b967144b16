//! Cell reference decoding
//!
//! A reference lexeme has the form `R<row>C<col>` where each part is either an
//! absolute index (`5`) or a bracketed offset (`[-1]`) relative to the cell whose
//! expression contains the reference.

use std::fmt;

use crate::error::{FormulaError, FormulaResult};
use rcgrid_core::Coordinates;

/// One axis of a cell reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePart {
    Absolute(i64),
    Relative(i64),
}

impl ReferencePart {
    fn resolve(self, origin: i64) -> Option<i64> {
        match self {
            ReferencePart::Absolute(index) => Some(index),
            ReferencePart::Relative(offset) => origin.checked_add(offset),
        }
    }
}

impl fmt::Display for ReferencePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferencePart::Absolute(index) => write!(f, "{index}"),
            ReferencePart::Relative(offset) => write!(f, "[{offset}]"),
        }
    }
}

/// A decoded `R..C..` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReference {
    pub row: ReferencePart,
    pub col: ReferencePart,
}

impl CellReference {
    /// Decode a reference lexeme such as `R5C3`, `R[-1]C[0]` or `R[2]C7`
    pub fn parse(lexeme: &str) -> FormulaResult<Self> {
        let rest = lexeme
            .strip_prefix('R')
            .ok_or_else(|| invalid(lexeme))?;
        let (row, rest) = parse_part(rest).ok_or_else(|| invalid(lexeme))?;
        let rest = rest.strip_prefix('C').ok_or_else(|| invalid(lexeme))?;
        let (col, rest) = parse_part(rest).ok_or_else(|| invalid(lexeme))?;

        if !rest.is_empty() {
            return Err(invalid(lexeme));
        }
        Ok(Self { row, col })
    }

    /// Target coordinates when the reference appears in the cell at `origin`
    pub fn resolve(&self, origin: Coordinates) -> FormulaResult<Coordinates> {
        match (self.row.resolve(origin.row), self.col.resolve(origin.col)) {
            (Some(row), Some(col)) => Ok(Coordinates::new(row, col)),
            _ => Err(FormulaError::ReferenceOutOfRange {
                reference: self.to_string(),
                origin,
            }),
        }
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}

fn invalid(lexeme: &str) -> FormulaError {
    FormulaError::Syntax(format!("invalid cell reference '{lexeme}'"))
}

/// Split one reference part off the front of `s`
fn parse_part(s: &str) -> Option<(ReferencePart, &str)> {
    if let Some(inner) = s.strip_prefix('[') {
        let end = inner.find(']')?;
        let digits = inner[..end].strip_prefix('-').unwrap_or(&inner[..end]);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let offset = inner[..end].parse().ok()?;
        Some((ReferencePart::Relative(offset), &inner[end + 1..]))
    } else {
        let end = s
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(s.len());
        if end == 0 {
            return None;
        }
        let index = s[..end].parse().ok()?;
        Some((ReferencePart::Absolute(index), &s[end..]))
    }
}
