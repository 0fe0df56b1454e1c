//! Seeded randomness for the engines
//!
//! Each game state owns a [`GameRng`] created from a `u64` seed, so two states
//! built from the same seed and fed the same inputs evolve identically.
//! Helpers elsewhere take `&mut impl Rng` so tests can hand in their own.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Generator owned by every game state
pub type GameRng = Pcg32;

/// Create the generator for a run
pub fn seeded(seed: u64) -> GameRng {
    Pcg32::seed_from_u64(seed)
}
