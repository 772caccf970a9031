//! Shared helpers for the solmae integration tests

pub mod stats;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Seeded RNG so every statistical test is reproducible
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
