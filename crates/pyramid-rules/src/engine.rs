//! The rule engine: validation, validity and random repair.
//!
//! The engine owns the pyramid and the color source used for repairs. It is
//! purely synchronous; whoever drives it decides when to validate and how
//! often to repair.

use pyramid_topology::{Cell, ColorSource, Position, Pyramid};
use tracing::{debug, info, warn};

use crate::convergence::{ConvergenceState, RepairState};
use crate::validity::{evaluate, Violation};
use crate::{Error, Result};

/// Validates and repairs a pyramid.
#[derive(Debug)]
pub struct RuleEngine<C> {
    pyramid: Pyramid,
    colors: C,
    violations: Vec<Violation>,
    convergence: ConvergenceState,
}

impl<C: ColorSource> RuleEngine<C> {
    /// Wrap an existing pyramid. Flags are not trusted until `validate` runs.
    pub fn new(pyramid: Pyramid, colors: C) -> Self {
        Self {
            pyramid,
            colors,
            violations: Vec::new(),
            convergence: ConvergenceState::default(),
        }
    }

    /// Build a fresh pyramid of `row_count` rows and wrap it.
    pub fn create(row_count: usize, mut colors: C) -> Result<Self> {
        let pyramid = Pyramid::create(row_count, &mut colors)?;
        info!(
            rows = pyramid.row_count(),
            cells = pyramid.cell_count(),
            "pyramid created"
        );
        Ok(Self::new(pyramid, colors))
    }

    pub fn pyramid(&self) -> &Pyramid {
        &self.pyramid
    }

    #[cfg(test)]
    pub(crate) fn pyramid_mut(&mut self) -> &mut Pyramid {
        &mut self.pyramid
    }

    pub fn convergence(&self) -> &ConvergenceState {
        &self.convergence
    }

    /// Violations found by the latest `validate`.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Positions of every currently violating cell, row-major.
    pub fn violating_positions(&self) -> Vec<Position> {
        self.pyramid
            .cells()
            .filter(|c| c.is_violating())
            .map(Cell::position)
            .collect()
    }

    pub fn into_parts(self) -> (Pyramid, C) {
        (self.pyramid, self.colors)
    }

    /// Recompute every cell's violation flag.
    ///
    /// Flags are cleared first, so running this twice without a mutation in
    /// between leaves identical flags.
    pub fn validate(&mut self) {
        for cell in self.pyramid.cells_mut() {
            cell.clear_violation();
        }

        self.violations = evaluate(&self.pyramid);
        for violation in &self.violations {
            if let Some(cell) = self.pyramid.find_by_position_mut(violation.position) {
                cell.mark_violating();
            }
        }

        let tension = self.pyramid.cells().filter(|c| c.is_violating()).count();
        self.convergence.record_validation(tension);
        debug!(
            violations = self.violations.len(),
            violating_cells = tension,
            "rule pass complete"
        );
    }

    /// True iff no cell is flagged. Reads flags only; call `validate` first.
    ///
    /// An empty pyramid is vacuously valid.
    pub fn is_valid(&self) -> bool {
        !self.pyramid.cells().any(Cell::is_violating)
    }

    /// Recolor every violating cell and clear its flag.
    ///
    /// Does not revalidate; the new colors may still break a rule. Returns
    /// the number of cells recolored.
    pub fn fix_invalid_cells(&mut self) -> usize {
        let mut repaired = 0;
        for cell in self.pyramid.cells_mut() {
            if cell.is_violating() {
                let color = self.colors.next_color();
                debug!(position = %cell.position(), from = %cell.color(), to = %color, "recolor");
                cell.set_color(color);
                cell.clear_violation();
                repaired += 1;
            }
        }
        repaired
    }

    /// One repair round: fix, then revalidate.
    pub fn repair_round(&mut self) -> RepairState {
        let repaired = self.fix_invalid_cells();
        self.convergence.record_repair(repaired);
        self.validate();

        let state = RepairState::from_valid(self.is_valid());
        info!(
            round = self.convergence.rounds,
            repaired,
            remaining = self.convergence.tension,
            %state,
            "repair round"
        );
        state
    }

    /// Validate, then repair until valid or `max_rounds` rounds have run.
    ///
    /// Returns the number of rounds it took.
    pub fn run_until_valid(&mut self, max_rounds: usize) -> Result<usize> {
        self.validate();

        let mut rounds = 0;
        while !self.is_valid() {
            if rounds == max_rounds {
                warn!(
                    rounds,
                    remaining = self.convergence.tension,
                    "repair did not converge"
                );
                return Err(Error::NotConverged { rounds });
            }
            self.repair_round();
            rounds += 1;
        }
        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use pyramid_topology::Color::{self, Blue as B, Pink as P, Yellow as Y};
    use pyramid_topology::{ColorSequence, RandomColors};

    fn engine(rows: Vec<Vec<Color>>, repair_with: Color) -> RuleEngine<ColorSequence> {
        RuleEngine::new(
            Pyramid::from_colors(rows).unwrap(),
            ColorSequence::constant(repair_with),
        )
    }

    fn flags(engine: &RuleEngine<impl ColorSource>) -> Vec<bool> {
        engine.pyramid().cells().map(Cell::is_violating).collect()
    }

    #[test]
    fn single_blue_cell_is_invalid() {
        let mut engine = engine(vec![vec![B]], P);
        engine.validate();
        assert!(!engine.is_valid());
        assert_eq!(engine.violating_positions(), [Position::new(1, 1)]);
    }

    #[test]
    fn all_pink_is_valid() {
        let mut engine = RuleEngine::create(5, ColorSequence::constant(P)).unwrap();
        engine.validate();
        assert!(engine.is_valid());
        assert!(engine.convergence().is_converged());
    }

    #[test]
    fn empty_pyramid_is_vacuously_valid() {
        let mut engine = RuleEngine::new(Pyramid::empty(), ColorSequence::constant(B));
        assert!(engine.is_valid());
        engine.validate();
        assert!(engine.is_valid());
        assert_eq!(engine.fix_invalid_cells(), 0);
        assert_eq!(engine.run_until_valid(0).unwrap(), 0);
    }

    #[test]
    fn create_rejects_zero_rows() {
        let result = RuleEngine::create(0, ColorSequence::constant(P));
        assert!(matches!(
            result,
            Err(Error::Topology(pyramid_topology::Error::EmptyPyramid))
        ));
    }

    #[test]
    fn validate_clears_stale_flags() {
        let mut engine = engine(vec![vec![B]], P);
        engine.validate();
        assert!(!engine.is_valid());

        engine
            .pyramid_mut()
            .find_by_position_mut(Position::new(1, 1))
            .unwrap()
            .set_color(Y);
        engine.validate();
        assert!(engine.is_valid());
    }

    #[test]
    fn validate_is_idempotent() {
        let mut engine = engine(vec![vec![P], vec![B, P, B], vec![Y, Y, Y, Y, Y]], P);
        engine.validate();
        let first = flags(&engine);
        engine.validate();
        assert_eq!(first, flags(&engine));
    }

    #[test]
    fn fix_only_touches_violating_cells() {
        let mut engine = engine(vec![vec![P], vec![Y, B, Y]], Y);
        engine.validate();
        assert_eq!(engine.violating_positions(), [Position::new(1, 2)]);

        let repaired = engine.fix_invalid_cells();
        assert_eq!(repaired, 1);

        let colors: Vec<_> = engine.pyramid().cells().map(Cell::color).collect();
        assert_eq!(colors, [Y, Y, B, Y]);
        assert!(engine.is_valid(), "fix clears flags without revalidating");
    }

    #[test]
    fn fix_does_not_revalidate() {
        // Repairing with blue puts a blue back on the apex edge; the flag
        // stays clear until the next validate.
        let mut engine = engine(vec![vec![B]], B);
        engine.validate();
        engine.fix_invalid_cells();
        assert!(engine.is_valid());
        engine.validate();
        assert!(!engine.is_valid());
    }

    #[test]
    fn repair_round_converges() {
        let mut engine = engine(vec![vec![B], vec![Y, Y, Y]], Y);
        assert_eq!(engine.run_until_valid(10).unwrap(), 1);
        assert_eq!(engine.convergence().rounds, 1);
        assert_eq!(engine.convergence().total_repaired, 1);
        assert_eq!(engine.convergence().state(), RepairState::Valid);
    }

    #[test]
    fn repair_can_oscillate() {
        // Every repair turns the edge blues pink, which then touch the
        // middle blue: the pyramid never settles.
        let mut engine = engine(vec![vec![B], vec![B, B, B]], P);
        let result = engine.run_until_valid(3);
        assert!(matches!(result, Err(Error::NotConverged { rounds: 3 })));
        assert_eq!(engine.convergence().rounds, 3);
        assert_eq!(engine.convergence().tension, 3);
    }

    #[test]
    fn violations_recorded_per_pass() {
        let mut engine = engine(vec![vec![P], vec![P, P, P], vec![Y, Y, Y, Y, Y]], P);
        engine.validate();
        assert_eq!(engine.violations().len(), 5);
        assert_eq!(engine.violating_positions().len(), 5);
    }

    #[test]
    fn seeded_pyramid_eventually_valid() {
        let mut engine = RuleEngine::create(5, RandomColors::seeded(2024)).unwrap();
        let rounds = engine.run_until_valid(10_000).unwrap();
        assert!(engine.is_valid());
        assert_eq!(engine.convergence().rounds, rounds);
    }

    proptest! {
        #[test]
        fn flags_match_rule_pass(seed in any::<u64>(), rows in 1usize..8) {
            let mut engine = RuleEngine::create(rows, RandomColors::seeded(seed)).unwrap();
            engine.validate();

            let mut expected: Vec<_> = evaluate(engine.pyramid())
                .into_iter()
                .map(|v| v.position)
                .collect();
            expected.sort();
            expected.dedup();
            let mut actual = engine.violating_positions();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn validate_twice_is_stable(seed in any::<u64>(), rows in 1usize..8) {
            let mut engine = RuleEngine::create(rows, RandomColors::seeded(seed)).unwrap();
            engine.validate();
            let first = flags(&engine);
            engine.validate();
            prop_assert_eq!(first, flags(&engine));
        }

        #[test]
        fn fix_keeps_valid_cells(seed in any::<u64>(), rows in 1usize..8) {
            let mut engine = RuleEngine::create(rows, RandomColors::seeded(seed)).unwrap();
            engine.validate();
            let before: Vec<_> = engine.pyramid().cells().cloned().collect();

            engine.fix_invalid_cells();

            for (old, new) in before.iter().zip(engine.pyramid().cells()) {
                prop_assert!(!new.is_violating());
                prop_assert_eq!(old.position(), new.position());
                if !old.is_violating() {
                    prop_assert_eq!(old.color(), new.color());
                }
            }
        }

        #[test]
        fn blue_edges_always_flagged(seed in any::<u64>(), rows in 1usize..8) {
            let mut engine = RuleEngine::create(rows, RandomColors::seeded(seed)).unwrap();
            engine.validate();
            for row in engine.pyramid().rows() {
                for cell in [row.first(), row.last()].into_iter().flatten() {
                    if cell.color() == B {
                        prop_assert!(cell.is_violating());
                    }
                }
            }
        }

        #[test]
        fn pink_touching_blue_flagged(seed in any::<u64>(), rows in 1usize..8) {
            let mut engine = RuleEngine::create(rows, RandomColors::seeded(seed)).unwrap();
            engine.validate();
            let pyramid = engine.pyramid();
            for cell in pyramid.cells() {
                if cell.color() == P && crate::touches_blue(pyramid, cell.position()) {
                    prop_assert!(cell.is_violating());
                }
            }
        }
    }
}
