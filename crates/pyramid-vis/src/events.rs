//! Serializable pyramid state and repair events.

use pyramid_rules::ConvergenceState;
use pyramid_topology::{Cell, Color, Position, Pyramid};
use serde::{Deserialize, Serialize};

/// State of one cell, as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub position: Position,
    pub color: Color,
    pub violating: bool,
}

impl From<&Cell> for CellState {
    fn from(cell: &Cell) -> Self {
        Self {
            position: cell.position(),
            color: cell.color(),
            violating: cell.is_violating(),
        }
    }
}

/// The whole pyramid at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PyramidSnapshot {
    pub round: usize,
    pub rows: usize,
    pub width: usize,
    pub valid: bool,
    pub violating: usize,
    pub cells: Vec<CellState>,
}

impl PyramidSnapshot {
    pub fn capture(pyramid: &Pyramid, convergence: &ConvergenceState) -> Self {
        let cells: Vec<CellState> = pyramid.cells().map(CellState::from).collect();
        let violating = cells.iter().filter(|c| c.violating).count();

        Self {
            round: convergence.rounds,
            rows: pyramid.row_count(),
            width: pyramid.width(),
            valid: violating == 0,
            violating,
            cells,
        }
    }
}

/// Events emitted while repairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepairEvent {
    /// Initial state after the first rule pass
    Started { snapshot: PyramidSnapshot },

    /// A repair round finished
    Repaired {
        round: usize,
        repaired: usize,
        remaining: usize,
        valid: bool,
    },

    /// Every rule is satisfied
    Converged {
        rounds: usize,
        snapshot: PyramidSnapshot,
    },

    /// Repair stopped before the pyramid became valid
    GaveUp { rounds: usize, remaining: usize },
}
