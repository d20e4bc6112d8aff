//! Driver configuration.
//!
//! Values come from environment variables with defaults, and command-line
//! flags override them.
//!
//! | Variable                     | Flag            | Default |
//! |------------------------------|-----------------|---------|
//! | `PYRAMID_ROWS`               | `--rows`        | 5       |
//! | `PYRAMID_REPAIR_INTERVAL_MS` | `--interval-ms` | 3000    |
//! | `PYRAMID_FRAME_MS`           | `--frame-ms`    | 16      |
//! | `PYRAMID_SEED`               | `--seed`        | entropy |
//! | `PYRAMID_MAX_ROUNDS`         | `--max-rounds`  | 10000   |
//! |                              | `--headless`    | off     |
//! |                              | `--json`        | off     |

use std::str::FromStr;
use std::time::Duration;

use pyramid_topology::{DEFAULT_ROWS, MAX_ROWS};

use crate::{Error, Result};

/// Wait between repair rounds while the pyramid is invalid.
pub const DEFAULT_REPAIR_INTERVAL: Duration = Duration::from_millis(3000);

/// Input polling interval for the interactive loop.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Repair rounds before headless mode gives up.
pub const DEFAULT_MAX_ROUNDS: usize = 10_000;

/// Configuration for a pyramid run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Pyramid rows
    pub rows: usize,
    /// Idle time to accumulate before a repair round
    pub repair_interval: Duration,
    /// Frame pacing for the interactive loop
    pub frame_interval: Duration,
    /// Seed for reproducible colors; `None` uses OS entropy
    pub seed: Option<u64>,
    /// Repair without a terminal UI
    pub headless: bool,
    /// Headless only: print JSON events instead of log lines
    pub json: bool,
    /// Headless only: give up after this many rounds
    pub max_rounds: usize,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            repair_interval: DEFAULT_REPAIR_INTERVAL,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            seed: None,
            headless: false,
            json: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(rows) = lookup("PYRAMID_ROWS") {
            config.rows = parse_value("PYRAMID_ROWS", &rows)?;
        }
        if let Some(ms) = lookup("PYRAMID_REPAIR_INTERVAL_MS") {
            config.repair_interval =
                Duration::from_millis(parse_value("PYRAMID_REPAIR_INTERVAL_MS", &ms)?);
        }
        if let Some(ms) = lookup("PYRAMID_FRAME_MS") {
            config.frame_interval = Duration::from_millis(parse_value("PYRAMID_FRAME_MS", &ms)?);
        }
        if let Some(seed) = lookup("PYRAMID_SEED") {
            config.seed = Some(parse_value("PYRAMID_SEED", &seed)?);
        }
        if let Some(rounds) = lookup("PYRAMID_MAX_ROUNDS") {
            config.max_rounds = parse_value("PYRAMID_MAX_ROUNDS", &rounds)?;
        }

        config.check()?;
        Ok(config)
    }

    /// Apply command-line flags on top of this config.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let flag = arg.as_ref().to_string();
            let mut value = || {
                args.next()
                    .map(|v| v.as_ref().to_string())
                    .ok_or_else(|| Error::Config(format!("{flag} needs a value")))
            };

            match flag.as_str() {
                "--rows" => self.rows = parse_value(&flag, &value()?)?,
                "--interval-ms" => {
                    self.repair_interval = Duration::from_millis(parse_value(&flag, &value()?)?)
                }
                "--frame-ms" => {
                    self.frame_interval = Duration::from_millis(parse_value(&flag, &value()?)?)
                }
                "--seed" => self.seed = Some(parse_value(&flag, &value()?)?),
                "--max-rounds" => self.max_rounds = parse_value(&flag, &value()?)?,
                "--headless" => self.headless = true,
                "--json" => self.json = true,
                other => return Err(Error::Config(format!("unknown argument: {other}"))),
            }
        }

        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(Error::Config(format!(
                "rows must be between 1 and {MAX_ROWS}, got {}",
                self.rows
            )));
        }
        if self.frame_interval.is_zero() {
            return Err(Error::Config("frame interval must be positive".into()));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name}: cannot parse {raw:?}")))
}
