//! Coordinates and area types

use std::fmt;

/// A cell position (or a relative offset) in a table
///
/// Both components are signed. Non-negative values address cells directly; negative
/// values only appear as deltas or as positions reached through relative cursor moves.
/// Ordering is row-major, which is the order used for deterministic iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Row index (0-based)
    pub row: i64,
    /// Column index (0-based)
    pub col: i64,
}

impl Coordinates {
    /// Create new coordinates
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The origin `(0, 0)`
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Whether either component is negative
    ///
    /// [`Table::set`](crate::Table::set) treats such coordinates as a cursor move.
    pub fn is_negative(&self) -> bool {
        self.row < 0 || self.col < 0
    }

    /// Add an offset, returning `None` on overflow
    pub fn checked_offset(self, delta: Coordinates) -> Option<Coordinates> {
        Some(Coordinates {
            row: self.row.checked_add(delta.row)?,
            col: self.col.checked_add(delta.col)?,
        })
    }

    /// Add an offset, clamping at the numeric limits
    pub fn saturating_offset(self, delta: Coordinates) -> Coordinates {
        Coordinates {
            row: self.row.saturating_add(delta.row),
            col: self.col.saturating_add(delta.col),
        }
    }
}

impl From<(i64, i64)> for Coordinates {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}

/// A rectangle described by two corners
///
/// No ordering between `from` and `to` is enforced. Operations that derive a
/// region from an area use the origin as the upper-left bound and the largest
/// row/column of either corner as the lower-right bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub from: Coordinates,
    pub to: Coordinates,
}

impl Area {
    /// Create an area from two corners
    pub fn new(from: Coordinates, to: Coordinates) -> Self {
        Self { from, to }
    }

    /// Create an area spanning from the origin to `to`
    pub fn to(to: Coordinates) -> Self {
        Self {
            from: Coordinates::origin(),
            to,
        }
    }

    /// Largest row of either corner
    pub fn max_row(&self) -> i64 {
        self.from.row.max(self.to.row)
    }

    /// Largest column of either corner
    pub fn max_col(&self) -> i64 {
        self.from.col.max(self.to.col)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_row_major() {
        let mut coords = vec![
            Coordinates::new(1, 0),
            Coordinates::new(0, 5),
            Coordinates::new(0, 1),
            Coordinates::new(-1, 9),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinates::new(-1, 9),
                Coordinates::new(0, 1),
                Coordinates::new(0, 5),
                Coordinates::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_offsets() {
        let c = Coordinates::new(2, 3);
        assert_eq!(
            c.checked_offset(Coordinates::new(-1, 4)),
            Some(Coordinates::new(1, 7))
        );
        assert_eq!(Coordinates::new(i64::MAX, 0).checked_offset((1, 0).into()), None);
        assert_eq!(
            Coordinates::new(i64::MIN, 0).saturating_offset((-1, 0).into()),
            Coordinates::new(i64::MIN, 0)
        );
    }

    #[test]
    fn test_area_bounds_ignore_corner_order() {
        let area = Area::new(Coordinates::new(4, 1), Coordinates::new(2, 6));
        assert_eq!(area.max_row(), 4);
        assert_eq!(area.max_col(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinates::new(-1, 3).to_string(), "R-1C3");
        assert_eq!(
            Area::to(Coordinates::new(2, 2)).to_string(),
            "R0C0:R2C2"
        );
    }
}
