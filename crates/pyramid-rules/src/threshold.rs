//! Yellow-count threshold for the row-count rule.
//!
//! A row may hold at most [`MAX_YELLOW_CELLS_IN_ROW`] yellow cells. The
//! count is a running one, taken left to right, so the rule fires on the
//! first yellow cell past the limit.

/// Most yellow cells a single row may contain.
pub const MAX_YELLOW_CELLS_IN_ROW: usize = 4;

/// Check if a running yellow count breaks the limit.
pub const fn exceeds_yellow_limit(yellow_count: usize) -> bool {
    yellow_count > MAX_YELLOW_CELLS_IN_ROW
}
