//! Cell colors and the color source port.
//!
//! Every color assignment (initial fill and repair) goes through a
//! [`ColorSource`], so callers decide whether colors are random, seeded or
//! scripted.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{Error, Result};

/// The fixed set of cell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Pink,
    Blue,
    Yellow,
}

impl Color {
    /// Every color, in palette order.
    pub const ALL: [Self; 3] = [Self::Pink, Self::Blue, Self::Yellow];

    /// Lowercase color name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        }
    }

    /// Display color as an RGB triple.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Pink => (255, 200, 200),
            Self::Blue => (0, 210, 255),
            Self::Yellow => (252, 254, 145),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

/// Something that hands out cell colors.
pub trait ColorSource {
    /// Pick the next color.
    fn next_color(&mut self) -> Color;
}

impl<S: ColorSource + ?Sized> ColorSource for &mut S {
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Uniform random choice over [`Color::ALL`].
#[derive(Debug, Clone)]
pub struct RandomColors<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomColors<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColors<StdRng> {
    /// Deterministic colors for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Colors seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        // ALL is non-empty
        *Color::ALL.choose(&mut self.rng).unwrap_or(&Color::Pink)
    }
}

/// A scripted, cycling sequence of colors.
#[derive(Debug, Clone)]
pub struct ColorSequence {
    colors: Vec<Color>,
    next: usize,
}

impl ColorSequence {
    /// Cycle through `colors` in order.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptySequence);
        }
        Ok(Self { colors, next: 0 })
    }

    /// Always hand out the same color.
    pub fn constant(color: Color) -> Self {
        Self {
            colors: vec![color],
            next: 0,
        }
    }

    /// How many colors have been handed out so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl ColorSource for ColorSequence {
    fn next_color(&mut self) -> Color {
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        color
    }
}
