//! The pyramid grid.
//!
//! Row `i` (0-indexed) holds exactly `2 * i + 1` cells stored left to right,
//! so the first and last cell of a row are its geometric edges. The shape is
//! fixed at construction; afterwards only a cell's color and violation flag
//! change.

use crate::{Color, ColorSource, Error, Neighbors, Position, Result, MAX_ROWS};

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    position: Position,
    color: Color,
    violating: bool,
}

impl Cell {
    /// Create a non-violating cell.
    pub const fn new(position: Position, color: Color) -> Self {
        Self {
            position,
            color,
            violating: false,
        }
    }

    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Whether the latest rule pass flagged this cell.
    #[inline]
    pub const fn is_violating(&self) -> bool {
        self.violating
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn mark_violating(&mut self) {
        self.violating = true;
    }

    pub fn clear_violation(&mut self) {
        self.violating = false;
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "color: {}, position: {}, violating: {}",
            self.color, self.position, self.violating
        )
    }
}

/// Number of cells in row `row` (0-indexed).
#[inline]
pub const fn cells_in_row(row: usize) -> usize {
    2 * row + 1
}

/// Which ends of its row a cell touches. The single apex cell touches both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowEdges {
    pub first: bool,
    pub last: bool,
}

impl RowEdges {
    /// Edges of the cell at `index` in a row of `row_len` cells.
    #[inline]
    pub const fn of(index: usize, row_len: usize) -> Self {
        Self {
            first: index == 0,
            last: index + 1 == row_len,
        }
    }

    /// Whether the cell is on either edge.
    #[inline]
    pub const fn any(self) -> bool {
        self.first || self.last
    }
}

/// Width of the widest row in a pyramid of `row_count` rows.
#[inline]
pub const fn pyramid_width(row_count: usize) -> usize {
    if row_count == 0 {
        0
    } else {
        cells_in_row(row_count - 1)
    }
}

/// A triangular grid of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pyramid {
    rows: Vec<Vec<Cell>>,
}

impl Pyramid {
    /// An uninitialized pyramid with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build `row_count` rows, drawing every cell's color from `colors`.
    pub fn create<C: ColorSource>(row_count: usize, mut colors: C) -> Result<Self> {
        check_row_count(row_count)?;

        let rows = (0..row_count)
            .map(|row| {
                (0..cells_in_row(row))
                    .map(|index| {
                        let position = Position::in_pyramid(row_count, row, index);
                        Cell::new(position, colors.next_color())
                    })
                    .collect()
            })
            .collect();

        Ok(Self { rows })
    }

    /// Build a pyramid from explicit row colors.
    pub fn from_colors(colors: Vec<Vec<Color>>) -> Result<Self> {
        let row_count = colors.len();
        check_row_count(row_count)?;

        let mut rows = Vec::with_capacity(row_count);
        for (row, row_colors) in colors.into_iter().enumerate() {
            let expected = cells_in_row(row);
            if row_colors.len() != expected {
                return Err(Error::MalformedRow {
                    row,
                    expected,
                    actual: row_colors.len(),
                });
            }
            rows.push(
                row_colors
                    .into_iter()
                    .enumerate()
                    .map(|(index, color)| {
                        Cell::new(Position::in_pyramid(row_count, row, index), color)
                    })
                    .collect(),
            );
        }

        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the bottom row.
    pub fn width(&self) -> usize {
        pyramid_width(self.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [Cell]> {
        self.rows.get_mut(row).map(Vec::as_mut_slice)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// All cells in row-major order, mutably.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flatten()
    }

    /// Row and in-row index of the cell at `position`, if one exists.
    pub fn index_of(&self, position: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(position.row.checked_sub(1)?).ok()?;
        let cells = self.rows.get(row)?;
        let first_column = i64::try_from(self.rows.len() - row).ok()?;
        let index = usize::try_from(position.column.checked_sub(first_column)?).ok()?;
        (index < cells.len()).then_some((row, index))
    }

    /// The cell at `position`. Off-grid positions return `None`.
    pub fn find_by_position(&self, position: Position) -> Option<&Cell> {
        let (row, index) = self.index_of(position)?;
        Some(&self.rows[row][index])
    }

    pub fn find_by_position_mut(&mut self, position: Position) -> Option<&mut Cell> {
        let (row, index) = self.index_of(position)?;
        self.row_mut(row).map(|cells| &mut cells[index])
    }

    /// Existing neighbors of `position`, in order up, down, left, right.
    pub fn neighbors_of(&self, position: Position) -> Vec<&Cell> {
        Neighbors::of(position)
            .filter_map(|p| self.find_by_position(p))
            .collect()
    }
}

fn check_row_count(row_count: usize) -> Result<()> {
    if row_count == 0 {
        return Err(Error::EmptyPyramid);
    }
    if row_count > MAX_ROWS {
        return Err(Error::RowCountTooLarge(row_count));
    }
    Ok(())
}
