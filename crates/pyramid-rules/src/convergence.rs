//! Repair convergence: the pyramid relaxes toward a valid coloring.
//!
//! Each round recolors every violating cell at random and revalidates. A
//! repaired cell can land on a bad color again, and a neighbor's violation
//! can survive the round, so convergence is probabilistic: there is no
//! terminal state and no bound on the number of rounds.
//!
//! ```text
//!            validate
//!   Invalid ──────────> Valid
//!      ^  │
//!      └──┘ repair + validate
//! ```

/// Grid-wide state after a rule pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairState {
    /// No cell is violating
    Valid,
    /// At least one cell is violating
    Invalid,
}

impl RepairState {
    pub const fn from_valid(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for RepairState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Bookkeeping across repair rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergenceState {
    /// Repair rounds run so far
    pub rounds: usize,
    /// Cells recolored in the latest round
    pub last_repaired: usize,
    /// Cells recolored across all rounds
    pub total_repaired: usize,
    /// Violating cells found by the latest rule pass
    pub tension: usize,
    /// Whether a rule pass has run at all
    pub validated: bool,
}

impl ConvergenceState {
    /// Check if the latest rule pass found nothing to repair.
    pub fn is_converged(&self) -> bool {
        self.validated && self.tension == 0
    }

    /// State implied by the latest rule pass.
    pub fn state(&self) -> RepairState {
        RepairState::from_valid(self.is_converged())
    }

    pub(crate) fn record_validation(&mut self, tension: usize) {
        self.validated = true;
        self.tension = tension;
    }

    pub(crate) fn record_repair(&mut self, repaired: usize) {
        self.rounds += 1;
        self.last_repaired = repaired;
        self.total_repaired += repaired;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_converged() {
        let state = ConvergenceState::default();
        assert!(!state.is_converged());
        assert_eq!(state.state(), RepairState::Invalid);
    }

    #[test]
    fn converged_after_clean_pass() {
        let mut state = ConvergenceState::default();
        state.record_validation(0);
        assert!(state.is_converged());
        assert_eq!(state.state(), RepairState::Valid);
    }

    #[test]
    fn repairs_accumulate() {
        let mut state = ConvergenceState::default();
        state.record_validation(6);
        state.record_repair(6);
        state.record_validation(2);
        state.record_repair(2);

        assert_eq!(state.rounds, 2);
        assert_eq!(state.last_repaired, 2);
        assert_eq!(state.total_repaired, 8);
        assert!(!state.is_converged());
    }

    #[test]
    fn repair_state_display() {
        assert_eq!(RepairState::Valid.to_string(), "valid");
        assert_eq!(RepairState::from_valid(false), RepairState::Invalid);
        assert!(!RepairState::Invalid.is_valid());
    }
}
