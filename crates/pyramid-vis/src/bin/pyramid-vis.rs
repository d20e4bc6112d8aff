//! Pyramid Game
//!
//! Builds a random pyramid and repairs it every few seconds until every rule
//! holds.
//!
//! Interactive mode draws the pyramid in the terminal; `--headless` repairs
//! back to back and logs each round (or prints JSON events with `--json`).
//!
//! Controls:
//! - q / Esc / Ctrl-C: Quit

use std::io::{self, Stdout, Write};
use std::time::Instant;

use crossterm::{cursor, event, execute, terminal};
use pyramid_rules::RuleEngine;
use pyramid_topology::RandomColors;
use pyramid_vis::{
    action_for, Driver, InputAction, Layout, RepairEvent, TerminalRenderer, TickOutcome,
    VisConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage() {
    eprintln!("pyramid-vis - render and self-repair a pyramid of colored cells");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  pyramid-vis [--rows N] [--interval-ms MS] [--frame-ms MS] [--seed N]");
    eprintln!("              [--headless [--json] [--max-rounds N]]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PYRAMID_ROWS                Rows in the pyramid (default: 5)");
    eprintln!("  PYRAMID_REPAIR_INTERVAL_MS  Wait between repairs (default: 3000)");
    eprintln!("  PYRAMID_FRAME_MS            Input polling interval (default: 16)");
    eprintln!("  PYRAMID_SEED                Seed for reproducible colors");
    eprintln!("  PYRAMID_MAX_ROUNDS          Headless repair limit (default: 10000)");
    eprintln!("  RUST_LOG                    Log filter");
}

/// Puts the terminal in raw mode on the alternate screen; restores on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(pyramid_vis::TITLE),
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let config = VisConfig::from_env()?.with_args(&args)?;

    // The interactive UI owns the screen, so only warnings get through by default.
    let default_filter = if config.headless {
        "pyramid_vis=info,pyramid_rules=info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let colors = match config.seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::from_entropy(),
    };
    let engine = RuleEngine::create(config.rows, colors)?;
    let mut driver = Driver::new(engine, config.repair_interval);

    tracing::info!(
        rows = config.rows,
        seed = ?config.seed,
        interval_ms = config.repair_interval.as_millis() as u64,
        headless = config.headless,
        "starting pyramid"
    );

    if config.headless {
        run_headless(&mut driver, &config)
    } else {
        run_interactive(&mut driver, &config)
    }
}

fn run_headless(
    driver: &mut Driver<RandomColors>,
    config: &VisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let json = config.json;

    let rounds = driver.run_to_completion(config.max_rounds, |event| {
        if json {
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, event)?;
            writeln!(out)?;
        } else if let RepairEvent::Repaired {
            round,
            repaired,
            remaining,
            ..
        } = event
        {
            tracing::debug!(round, repaired, remaining, "round complete");
        }
        Ok(())
    })?;

    tracing::info!(rounds, "pyramid is valid");
    Ok(())
}

fn run_interactive(
    driver: &mut Driver<RandomColors>,
    config: &VisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    let mut renderer = TerminalRenderer::new(stdout, Layout::default());

    let draw = |renderer: &mut TerminalRenderer<Stdout>, driver: &Driver<RandomColors>| {
        let engine = driver.engine();
        renderer.draw(engine.pyramid(), engine.convergence())
    };
    draw(&mut renderer, driver)?;

    let mut last_frame = Instant::now();
    while driver.is_running() {
        if event::poll(config.frame_interval)? {
            match action_for(&event::read()?) {
                InputAction::Quit => {
                    driver.stop();
                    continue;
                }
                InputAction::Redraw => draw(&mut renderer, driver)?,
                InputAction::Ignore => {}
            }
        }

        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        if let TickOutcome::Repaired { round, state, .. } = driver.tick(dt) {
            tracing::info!(round, %state, "redraw after repair");
            draw(&mut renderer, driver)?;
        }
    }

    Ok(())
}
