//! Pyramid coordinate system.
//!
//! Positions are 1-indexed `(row, column)` pairs. Row `i` (0-indexed) of a
//! pyramid with `R` rows starts at column `R - i`, so the apex sits in the
//! middle column and every row is centered under the one above it.
//!
//! ```text
//! row 1:             (1,5)
//! row 2:       (2,4) (2,5) (2,6)
//! row 3: (3,3) (3,4) (3,5) (3,6) (3,7)
//! ```
//!
//! Vertical neighbors therefore share a column index.

use std::ops::{Add, Sub};

/// A cell position in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Row, 1 at the apex
    pub row: i64,
    /// Column, 1 at the left edge of the widest row
    pub column: i64,
}

impl Position {
    /// Create a new position.
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// Position of the `index`-th cell (0-based, left to right) in row `row`
    /// (0-based) of a pyramid with `row_count` rows.
    pub const fn in_pyramid(row_count: usize, row: usize, index: usize) -> Self {
        Self {
            row: row as i64 + 1,
            column: (row_count - row + index) as i64,
        }
    }

    /// The position one row up.
    pub fn up(&self) -> Self {
        *self + Direction::Up.offset()
    }

    /// The position one row down.
    pub fn down(&self) -> Self {
        *self + Direction::Down.offset()
    }

    /// The position one column left.
    pub fn left(&self) -> Self {
        *self + Direction::Left.offset()
    }

    /// The position one column right.
    pub fn right(&self) -> Self {
        *self + Direction::Right.offset()
    }

    /// `self + other`, or `None` if either coordinate overflows.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match (self.row.checked_add(other.row), self.column.checked_add(other.column)) {
            (Some(row), Some(column)) => Some(Self { row, column }),
            _ => None,
        }
    }

    /// `self - other`, or `None` if either coordinate overflows.
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match (self.row.checked_sub(other.row), self.column.checked_sub(other.column)) {
            (Some(row), Some(column)) => Some(Self { row, column }),
            _ => None,
        }
    }
}

/// One of the four neighbor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in neighbor lookup order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The coordinate offset of one step in this direction.
    pub const fn offset(self) -> Position {
        match self {
            Self::Up => Position::new(-1, 0),
            Self::Down => Position::new(1, 0),
            Self::Left => Position::new(0, -1),
            Self::Right => Position::new(0, 1),
        }
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            row: self.row + other.row,
            column: self.column + other.column,
        }
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            row: self.row - other.row,
            column: self.column - other.column,
        }
    }
}

impl From<(i64, i64)> for Position {
    fn from((row, column): (i64, i64)) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
