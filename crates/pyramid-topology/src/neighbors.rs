//! 4-way neighbor computation.
//!
//! A cell at `(r, c)` has at most four neighbors, looked up in the fixed
//! order up, down, left, right. The geometry is translation-invariant; which
//! of the four actually exist depends on the pyramid.

use crate::{Direction, Position, NEIGHBOR_DIRECTIONS};

/// The neighbor directions of every cell.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors;

impl Neighbors {
    /// All four neighbor offsets, up, down, left, right.
    pub fn all_directions() -> [Position; NEIGHBOR_DIRECTIONS] {
        Direction::ALL.map(Direction::offset)
    }

    /// The candidate neighbors of a position, existing or not.
    ///
    /// Steps that would leave the `i64` coordinate range are skipped.
    pub fn of(position: Position) -> impl Iterator<Item = Position> {
        Self::all_directions()
            .into_iter()
            .filter_map(move |dir| position.checked_add(dir))
    }
}

/// Check if two positions are orthogonally adjacent.
pub fn are_neighbors(a: Position, b: Position) -> bool {
    b.checked_sub(a)
        .is_some_and(|diff| Neighbors::all_directions().contains(&diff))
}
