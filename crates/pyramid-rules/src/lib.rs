//! Pyramid Rule Engine
//!
//! Marks cells that break one of three fixed rules, reports whether the
//! pyramid as a whole is valid, and repairs violating cells by recoloring
//! them at random.
//!
//! # Rules
//!
//! 1. A blue cell may not be the first or last cell of its row.
//! 2. A pink cell may not have a blue up/down/left/right neighbor.
//! 3. A row may not contain more than four yellow cells; breaking this flags
//!    the entire row.
//!
//! # Self-Repair
//!
//! Repair is blind: every violating cell gets a fresh random color and its
//! flag is cleared. Repeating validate-then-repair walks the pyramid toward a
//! valid coloring, but nothing guarantees how many rounds that takes.
//!
//! ```
//! use pyramid_rules::RuleEngine;
//! use pyramid_topology::RandomColors;
//!
//! let mut engine = RuleEngine::create(5, RandomColors::seeded(7)).unwrap();
//! engine.validate();
//! while !engine.is_valid() {
//!     engine.fix_invalid_cells();
//!     engine.validate();
//! }
//! assert!(engine.pyramid().cells().all(|c| !c.is_violating()));
//! ```

mod convergence;
mod engine;
mod error;
mod threshold;
mod validity;

pub use convergence::{ConvergenceState, RepairState};
pub use engine::RuleEngine;
pub use error::{Error, Result};
pub use threshold::{exceeds_yellow_limit, MAX_YELLOW_CELLS_IN_ROW};
pub use validity::{evaluate, touches_blue, Rule, Violation};
