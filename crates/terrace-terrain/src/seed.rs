//! Deterministic per-tile RNG derivation.
//!
//! Every tile draws its randomness from its own stream derived from the world
//! seed and its grid cell, so regenerating one tile (or generating tiles in a
//! different order) reproduces the same geometry.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derive a u64 seed for the tile at `(row, level)`.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the world seed with
/// the grid cell into a well-distributed u64.
pub fn derive_tile_seed(world_seed: u64, row: usize, level: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    (row as u64).hash(&mut hasher);
    (level as u64).hash(&mut hasher);
    hasher.finish()
}

/// Derive a deterministic RNG for the tile at `(row, level)`.
pub fn tile_rng(world_seed: u64, row: usize, level: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_tile_seed(world_seed, row, level))
}
