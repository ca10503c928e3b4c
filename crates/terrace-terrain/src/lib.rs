//! Procedural terrain tiles: difficulty-scaled generators, world composition
//! and heightmap rasterization.

mod archetype;
mod error;
mod fbm;
mod heightmap;
mod seed;
mod world;

pub mod generators;

pub use archetype::{Archetype, ArchetypeSettings, Tile, TileGenerator, TileInfo, TileParams};
pub use error::TerrainError;
pub use heightmap::{DEFAULT_RAY_OFFSET, Heightmap, HeightmapGrid, rasterize, rasterize_with_offset};
pub use seed::{derive_tile_seed, tile_rng};
pub use world::{
    ArchetypeSelector, GenerationRecord, Proportions, RowInfo, World, WorldSpec, compose_world,
    difficulty_levels,
};
