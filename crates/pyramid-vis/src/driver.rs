//! The repair loop driver.
//!
//! Owns the rule engine, the repair clock and the stop flag. The caller
//! feeds it elapsed time once per frame; the driver decides whether a repair
//! round is due.

use std::time::Duration;

use pyramid_rules::{RepairState, RuleEngine};
use pyramid_topology::ColorSource;
use tracing::{info, warn};

use crate::clock::RepairClock;
use crate::events::{PyramidSnapshot, RepairEvent};
use crate::{Error, Result};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed
    Idle,
    /// A repair round ran; the pyramid needs redrawing
    Repaired {
        round: usize,
        repaired: usize,
        state: RepairState,
    },
}

/// Drives validation and repair of a pyramid.
pub struct Driver<C> {
    engine: RuleEngine<C>,
    clock: RepairClock,
    running: bool,
}

impl<C: ColorSource> Driver<C> {
    /// Wrap an engine and run the first rule pass.
    pub fn new(mut engine: RuleEngine<C>, repair_interval: Duration) -> Self {
        engine.validate();
        info!(
            valid = engine.is_valid(),
            violating = engine.convergence().tension,
            "initial validation"
        );
        Self {
            engine,
            clock: RepairClock::new(repair_interval),
            running: true,
        }
    }

    pub fn engine(&self) -> &RuleEngine<C> {
        &self.engine
    }

    pub fn clock(&self) -> &RepairClock {
        &self.clock
    }

    pub fn snapshot(&self) -> PyramidSnapshot {
        PyramidSnapshot::capture(self.engine.pyramid(), self.engine.convergence())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the loop to exit at its next check.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance time by `dt`, repairing if a round is due.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if !self.clock.advance(dt, self.engine.is_valid()) {
            return TickOutcome::Idle;
        }

        let state = self.engine.repair_round();
        let convergence = self.engine.convergence();
        TickOutcome::Repaired {
            round: convergence.rounds,
            repaired: convergence.last_repaired,
            state,
        }
    }

    /// Repair back to back, without waiting, until valid or out of rounds.
    ///
    /// Every step is reported to `emit`. Returns the rounds it took.
    pub fn run_to_completion<F>(&mut self, max_rounds: usize, mut emit: F) -> Result<usize>
    where
        F: FnMut(&RepairEvent) -> Result<()>,
    {
        emit(&RepairEvent::Started {
            snapshot: self.snapshot(),
        })?;

        let mut rounds = 0;
        while self.running && !self.engine.is_valid() {
            if rounds == max_rounds {
                let remaining = self.engine.convergence().tension;
                warn!(rounds, remaining, "giving up");
                emit(&RepairEvent::GaveUp { rounds, remaining })?;
                return Err(Error::Rules(pyramid_rules::Error::NotConverged { rounds }));
            }

            let state = self.engine.repair_round();
            rounds += 1;
            let convergence = self.engine.convergence();
            emit(&RepairEvent::Repaired {
                round: convergence.rounds,
                repaired: convergence.last_repaired,
                remaining: convergence.tension,
                valid: state.is_valid(),
            })?;
        }

        if self.engine.is_valid() {
            emit(&RepairEvent::Converged {
                rounds,
                snapshot: self.snapshot(),
            })?;
        }
        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyramid_topology::{Color, ColorSequence, Pyramid, RandomColors};

    const INTERVAL: Duration = Duration::from_millis(3000);

    fn driver(rows: Vec<Vec<Color>>, repair_with: Color) -> Driver<ColorSequence> {
        let pyramid = Pyramid::from_colors(rows).unwrap();
        Driver::new(
            RuleEngine::new(pyramid, ColorSequence::constant(repair_with)),
            INTERVAL,
        )
    }

    #[test]
    fn new_driver_validates() {
        let driver = driver(vec![vec![Color::Blue]], Color::Pink);
        assert!(!driver.engine().is_valid());
        assert!(driver.is_running());
    }

    #[test]
    fn no_repair_before_interval() {
        let mut driver = driver(vec![vec![Color::Blue]], Color::Pink);
        assert_eq!(driver.tick(Duration::from_millis(1000)), TickOutcome::Idle);
        assert_eq!(driver.tick(Duration::from_millis(2000)), TickOutcome::Idle);
        assert!(!driver.engine().is_valid());
    }

    #[test]
    fn repair_after_interval() {
        let mut driver = driver(vec![vec![Color::Blue]], Color::Pink);
        let outcome = driver.tick(Duration::from_millis(3001));
        assert_eq!(
            outcome,
            TickOutcome::Repaired {
                round: 1,
                repaired: 1,
                state: RepairState::Valid,
            }
        );
        assert!(driver.engine().is_valid());
    }

    #[test]
    fn valid_pyramid_is_left_alone() {
        let mut driver = driver(vec![vec![Color::Pink]], Color::Blue);
        for _ in 0..10 {
            assert_eq!(driver.tick(INTERVAL * 2), TickOutcome::Idle);
        }
        assert_eq!(driver.engine().convergence().rounds, 0);
    }

    #[test]
    fn stopped_driver_does_nothing() {
        let mut driver = driver(vec![vec![Color::Blue]], Color::Pink);
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.tick(INTERVAL * 2), TickOutcome::Idle);
        assert_eq!(driver.engine().convergence().rounds, 0);
    }

    #[test]
    fn run_to_completion_emits_events() {
        let mut driver = driver(vec![vec![Color::Blue], vec![Color::Yellow; 3]], Color::Yellow);
        let mut events = Vec::new();
        let rounds = driver
            .run_to_completion(10, |e| {
                events.push(e.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(rounds, 1);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RepairEvent::Started { .. }));
        assert!(matches!(
            events[1],
            RepairEvent::Repaired { round: 1, repaired: 1, remaining: 0, valid: true }
        ));
        assert!(matches!(events[2], RepairEvent::Converged { rounds: 1, .. }));
    }

    #[test]
    fn run_to_completion_gives_up() {
        // Edge blues repaired to pink end up touching the middle blue.
        let mut driver = driver(vec![vec![Color::Blue], vec![Color::Blue; 3]], Color::Pink);
        let mut gave_up = false;
        let result = driver.run_to_completion(2, |e| {
            gave_up |= matches!(e, RepairEvent::GaveUp { rounds: 2, .. });
            Ok(())
        });
        assert!(matches!(
            result,
            Err(Error::Rules(pyramid_rules::Error::NotConverged { rounds: 2 }))
        ));
        assert!(gave_up);
    }

    #[test]
    fn random_pyramid_reaches_valid() {
        let engine = RuleEngine::create(5, RandomColors::seeded(3)).unwrap();
        let mut driver = Driver::new(engine, INTERVAL);
        let mut ticks = 0;
        while !driver.engine().is_valid() && ticks < 100_000 {
            driver.tick(Duration::from_millis(500));
            ticks += 1;
        }
        assert!(driver.engine().is_valid());
        assert!(driver.snapshot().valid);
    }
}
