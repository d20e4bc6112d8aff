//! The three fixed pyramid rules.
//!
//! A cell is tested against exactly one rule, picked by its own color:
//!
//! | Color  | Rule        | Violation                                      |
//! |--------|-------------|------------------------------------------------|
//! | blue   | `Edge`      | cell is the first or last of its row           |
//! | pink   | `Adjacency` | any existing up/down/left/right neighbor is blue |
//! | yellow | `RowCount`  | running yellow count in the row exceeds 4      |
//!
//! Rows are scanned left to right. When `RowCount` fires, the whole row is
//! flagged and the rest of that row is not evaluated in this pass.

use pyramid_topology::{Cell, Color, Position, Pyramid, RowEdges};

use crate::threshold::exceeds_yellow_limit;

/// One of the fixed rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Blue cells may not sit on a row edge.
    Edge,
    /// Pink cells may not touch blue cells.
    Adjacency,
    /// A row may not hold more than four yellow cells.
    RowCount,
}

impl Rule {
    /// The rule a cell of `color` is tested against.
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::Blue => Self::Edge,
            Color::Pink => Self::Adjacency,
            Color::Yellow => Self::RowCount,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::Adjacency => "adjacency",
            Self::RowCount => "row-count",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A cell flagged by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Violation {
    pub position: Position,
    pub rule: Rule,
}

/// Whether any existing neighbor of `position` is blue.
pub fn touches_blue(pyramid: &Pyramid, position: Position) -> bool {
    pyramid
        .neighbors_of(position)
        .into_iter()
        .any(|n| n.color() == Color::Blue)
}

/// Run every rule over the pyramid, in row-major order.
///
/// Pure: the pyramid is not touched. A cell may appear more than once when a
/// row-count breach sweeps up a cell that was already flagged earlier in the
/// same row.
pub fn evaluate(pyramid: &Pyramid) -> Vec<Violation> {
    let mut violations = Vec::new();
    for row in pyramid.rows() {
        evaluate_row(pyramid, row, &mut violations);
    }
    violations
}

fn evaluate_row(pyramid: &Pyramid, row: &[Cell], violations: &mut Vec<Violation>) {
    let mut yellow_count = 0;

    for (index, cell) in row.iter().enumerate() {
        let rule = Rule::for_color(cell.color());
        let violated = match rule {
            Rule::Edge => RowEdges::of(index, row.len()).any(),
            Rule::Adjacency => touches_blue(pyramid, cell.position()),
            Rule::RowCount => {
                yellow_count += 1;
                if exceeds_yellow_limit(yellow_count) {
                    violations.extend(row.iter().map(|c| Violation {
                        position: c.position(),
                        rule: Rule::RowCount,
                    }));
                    return;
                }
                false
            }
        };

        if violated {
            violations.push(Violation {
                position: cell.position(),
                rule,
            });
        }
    }
}
