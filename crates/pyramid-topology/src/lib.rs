//! Pyramid Grid Topology
//!
//! A fixed triangular arrangement of colored cells.
//!
//! # Shape
//!
//! A pyramid of `R` rows has `2 * i + 1` cells in row `i` (0-indexed), so the
//! bottom row is `2 * (R - 1) + 1` cells wide. Each cell gets a unique
//! 1-indexed `(row, column)` position when the pyramid is built; rows are
//! centered, which puts vertically stacked cells in the same column.
//!
//! # Adjacency
//!
//! Neighbors are orthogonal: up, down, left and right. Only positions that
//! hold an actual cell count, so the apex has a single neighbor and row
//! edges have fewer than four.
//!
//! # Colors
//!
//! Colors come from a [`ColorSource`]. [`RandomColors`] draws uniformly from
//! the palette; [`ColorSequence`] replays a script for tests.

mod color;
mod error;
mod neighbors;
mod position;
mod pyramid;

pub use color::{Color, ColorSequence, ColorSource, RandomColors};
pub use error::{Error, Result};
pub use neighbors::{are_neighbors, Neighbors};
pub use position::{Direction, Position};
pub use pyramid::{cells_in_row, pyramid_width, Cell, Pyramid, RowEdges};

/// Number of neighbor directions per cell.
pub const NEIGHBOR_DIRECTIONS: usize = 4;

/// Rows in the reference pyramid.
pub const DEFAULT_ROWS: usize = 5;

/// Largest pyramid we agree to build.
pub const MAX_ROWS: usize = 4096;

const _: () = assert!(Direction::ALL.len() == NEIGHBOR_DIRECTIONS);
