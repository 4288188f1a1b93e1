//! Dice Rolling
//!
//! Initiative rolls go through the `DiceSource` trait so tests can script
//! exact die faces and replays can reuse a seed. Production code uses
//! `DiceRoller`, which draws from a seedable RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of d10 rolls for initiative.
pub trait DiceSource {
    /// Uniform roll in `[1, 10]`.
    fn d10(&mut self) -> u32;
}

/// Default dice roller backed by `StdRng`.
#[derive(Debug)]
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible roller for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform roll in `[1, sides]`. Zero sides rolls zero.
    pub fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides)
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for DiceRoller {
    fn d10(&mut self) -> u32 {
        self.roll(10)
    }
}
