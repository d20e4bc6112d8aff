//! Pyramid Visualization
//!
//! Drives a pyramid's repair loop and draws it in the terminal.
//!
//! # Architecture
//!
//! - **Driver**: owns the rule engine and repairs on a fixed cadence while
//!   the pyramid is invalid
//! - **Renderer**: draws cells, row-edge borders and violation markers with
//!   crossterm
//! - **Events**: JSON-serializable snapshots and repair events for headless
//!   runs
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use pyramid_rules::RuleEngine;
//! use pyramid_topology::RandomColors;
//! use pyramid_vis::{Driver, TickOutcome};
//!
//! let engine = RuleEngine::create(5, RandomColors::from_entropy()).unwrap();
//! let mut driver = Driver::new(engine, Duration::from_millis(3000));
//! while driver.is_running() {
//!     if let TickOutcome::Repaired { .. } = driver.tick(Duration::from_millis(16)) {
//!         // redraw
//!     }
//! #   driver.stop();
//! }
//! ```

mod clock;
mod config;
mod driver;
mod error;
mod events;
mod input;
mod layout;
mod render;

pub use clock::RepairClock;
pub use config::{
    VisConfig, DEFAULT_FRAME_INTERVAL, DEFAULT_MAX_ROUNDS, DEFAULT_REPAIR_INTERVAL,
};
pub use driver::{Driver, TickOutcome};
pub use error::{Error, Result};
pub use events::{CellState, PyramidSnapshot, RepairEvent};
pub use input::{action_for, is_quit, InputAction};
pub use layout::Layout;
pub use render::{term_color, TerminalRenderer, TITLE};
