//! Terminal geometry for drawing a pyramid.
//!
//! Column `c` of the pyramid maps to a fixed-width block on screen, so rows
//! line up the same way the positions do: the apex sits above the middle of
//! the bottom row.

use pyramid_topology::Position;

/// Convert to screen units, pinning values that don't fit at the far edge.
fn screen<T: TryInto<u16>>(value: T) -> u16 {
    value.try_into().unwrap_or(u16::MAX)
}

/// Screen geometry, in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width of one pyramid cell
    pub cell_width: u16,
    /// Height of one pyramid cell
    pub cell_height: u16,
    /// Blank columns between neighboring cells
    pub gap: u16,
    /// Left margin, leaves room for the row-edge border
    pub margin: u16,
    /// First screen row used by the pyramid
    pub top: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_width: 5,
            cell_height: 2,
            gap: 1,
            margin: 2,
            top: 2,
        }
    }
}

impl Layout {
    /// Top-left screen corner of the cell at `position`.
    pub fn cell_origin(&self, position: Position) -> (u16, u16) {
        let column = screen(position.column.saturating_sub(1).max(0));
        let row = screen(position.row.saturating_sub(1).max(0));
        (
            self.margin
                .saturating_add(column.saturating_mul(self.cell_width.saturating_add(self.gap))),
            self.top.saturating_add(row.saturating_mul(self.cell_height)),
        )
    }

    /// Where the violation marker goes inside the cell at `position`.
    pub fn marker(&self, position: Position) -> (u16, u16) {
        let (x, y) = self.cell_origin(position);
        (
            x.saturating_add(self.cell_width / 2),
            y.saturating_add(self.cell_height.saturating_sub(1) / 2),
        )
    }

    /// Column of the border drawn left of a row's first cell.
    pub fn left_border(&self, position: Position) -> u16 {
        self.cell_origin(position).0.saturating_sub(1)
    }

    /// Column of the border drawn right of a row's last cell.
    pub fn right_border(&self, position: Position) -> u16 {
        self.cell_origin(position).0.saturating_add(self.cell_width)
    }

    /// Screen size needed for a pyramid `width` cells wide and `rows` tall.
    pub fn size(&self, width: usize, rows: usize) -> (u16, u16) {
        let width = screen(width);
        (
            self.margin
                .saturating_mul(2)
                .saturating_add(width.saturating_mul(self.cell_width.saturating_add(self.gap))),
            self.status_row(rows).saturating_add(1),
        )
    }

    /// Screen row of the status line, below the pyramid.
    pub fn status_row(&self, rows: usize) -> u16 {
        self.top
            .saturating_add(screen(rows).saturating_mul(self.cell_height))
            .saturating_add(1)
    }
}
