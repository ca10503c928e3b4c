//! Terrain archetypes and the tile generation capability they share.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::Mesh;

use crate::error::TerrainError;
use crate::generators::{
    BlocksConfig, CheckerConfig, FlatGenerator, PerlinConfig, SlopeConfig, SquareCentricConfig,
    StairDirection, Stairs, StairsConfig, TiltedSquaresConfig,
};

/// A named terrain generation strategy.
///
/// Declaration order is the canonical enumeration order used when building
/// the cumulative selection partition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Archetype {
    #[serde(rename = "stairs_upwards")]
    StairsUp,
    #[serde(rename = "stairs_downwards")]
    StairsDown,
    #[serde(rename = "random_blocks")]
    RandomBlocks,
    #[serde(rename = "perlin")]
    Perlin,
    #[serde(rename = "checkerboard")]
    Checkerboard,
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "square_centric")]
    SquareCentric,
    #[serde(rename = "slope")]
    Slope,
    #[serde(rename = "tilted_squares")]
    TiltedSquares,
}

impl Archetype {
    /// Every archetype, in canonical order.
    pub const ALL: [Archetype; 9] = [
        Archetype::StairsUp,
        Archetype::StairsDown,
        Archetype::RandomBlocks,
        Archetype::Perlin,
        Archetype::Checkerboard,
        Archetype::Flat,
        Archetype::SquareCentric,
        Archetype::Slope,
        Archetype::TiltedSquares,
    ];

    /// Stable snake_case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Archetype::StairsUp => "stairs_upwards",
            Archetype::StairsDown => "stairs_downwards",
            Archetype::RandomBlocks => "random_blocks",
            Archetype::Perlin => "perlin",
            Archetype::Checkerboard => "checkerboard",
            Archetype::Flat => "flat",
            Archetype::SquareCentric => "square_centric",
            Archetype::Slope => "slope",
            Archetype::TiltedSquares => "tilted_squares",
        }
    }

    /// Look up an archetype by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete generator parameters after difficulty scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileParams {
    Stairs {
        step_width: f64,
        step_height: f64,
        platform_size: f64,
        num_steps: usize,
        going_up: bool,
    },
    Blocks {
        block_size: f64,
        min_block_height: f64,
        max_block_height: f64,
        noise: f64,
        platform_size: f64,
    },
    Perlin {
        resolution_per_meter: f64,
        scale: f64,
        amplitude: f64,
        octaves: u32,
        platform_size: f64,
        platform_smoothing_distance: f64,
        edge_smoothing_distance: f64,
        /// Noise-space offset drawn per tile so tiles differ.
        offset: [f64; 2],
    },
    Checkerboard {
        block_size: f64,
        block_height: f64,
        noise: f64,
        platform_size: f64,
    },
    Flat,
    SquareCentric {
        step_width: f64,
        step_height: f64,
        step_spacing: f64,
        platform_size: f64,
        num_rings: usize,
    },
    Slope {
        total_height: f64,
        bar_height: f64,
        bar_width: f64,
        platform_size: f64,
        border_width: f64,
        going_up: bool,
    },
    TiltedSquares {
        block_size: f64,
        block_height: f64,
        noise: f64,
        platform_size: f64,
    },
}

/// Metadata describing how a tile was generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileInfo {
    pub archetype: Archetype,
    pub difficulty: f64,
    pub tile_size: f64,
    pub params: TileParams,
}

/// A tile mesh on the footprint `[0, tile_size]²`, plus its metadata.
#[derive(Clone, Debug)]
pub struct Tile {
    pub mesh: Mesh,
    pub info: TileInfo,
}

/// Builds one tile of a given archetype from a normalized difficulty.
pub trait TileGenerator {
    /// The archetype this generator produces.
    fn archetype(&self) -> Archetype;

    /// Generate a tile covering exactly `[0, tile_size]²`.
    ///
    /// `difficulty` must lie in `[0, 1]`. Stochastic generators draw only from
    /// `rng`, so a seeded RNG reproduces the tile.
    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError>;
}

/// Generator configuration for every archetype.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeSettings {
    pub stairs_upwards: StairsConfig,
    pub stairs_downwards: StairsConfig,
    pub random_blocks: BlocksConfig,
    pub perlin: PerlinConfig,
    pub checkerboard: CheckerConfig,
    pub square_centric: SquareCentricConfig,
    pub slope: SlopeConfig,
    pub tilted_squares: TiltedSquaresConfig,
}

impl ArchetypeSettings {
    /// Generate a tile of `archetype` with its configured parameters.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        archetype: Archetype,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        match archetype {
            Archetype::StairsUp => Stairs::new(self.stairs_upwards.clone(), StairDirection::Up)
                .generate(tile_size, difficulty, rng),
            Archetype::StairsDown => {
                Stairs::new(self.stairs_downwards.clone(), StairDirection::Down)
                    .generate(tile_size, difficulty, rng)
            }
            Archetype::RandomBlocks => self.random_blocks.generate(tile_size, difficulty, rng),
            Archetype::Perlin => self.perlin.generate(tile_size, difficulty, rng),
            Archetype::Checkerboard => self.checkerboard.generate(tile_size, difficulty, rng),
            Archetype::Flat => FlatGenerator.generate(tile_size, difficulty, rng),
            Archetype::SquareCentric => self.square_centric.generate(tile_size, difficulty, rng),
            Archetype::Slope => self.slope.generate(tile_size, difficulty, rng),
            Archetype::TiltedSquares => self.tilted_squares.generate(tile_size, difficulty, rng),
        }
    }
}
