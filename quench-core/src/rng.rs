//! Seeding discipline for the engines used across a run.
//!
//! One master seed parameterizes a splittable sequence; every engine the
//! simulation owns is seeded from it in a fixed order. Two runs with the
//! same master seed therefore produce bit-identical trajectories.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Splittable seed sequence derived from a single master seed.
///
/// Engines must be spawned in a fixed, documented order; the engine seeds
/// are successive draws from an internal generator, so inserting a spawn
/// changes every later engine.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    rng: Xoshiro256PlusPlus,
}

impl SeedSequence {
    /// Creates the sequence for `master_seed`.
    pub fn new(master_seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(master_seed),
        }
    }

    /// Draws the next engine seed.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Spawns a new engine seeded from the sequence.
    pub fn spawn(&mut self) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(self.next_seed())
    }
}
