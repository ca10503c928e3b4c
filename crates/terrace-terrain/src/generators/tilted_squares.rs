//! Tilted squares: a grid of blocks whose tops lean in random directions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{square_plane, tilted_block};

use super::layout::CellGrid;
use super::{check_inputs, check_platform, check_positive, invalid, tile_center};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// Corner signs of a cell, counter-clockwise from (-, -).
const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Tilted squares parameters at full difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltedSquaresConfig {
    pub block_size: f64,
    /// Mean height of each block top.
    pub block_height: f64,
    /// Largest rise or fall of a block top across one cell, per axis.
    pub noise: f64,
    pub platform_size: f64,
}

impl Default for TiltedSquaresConfig {
    fn default() -> Self {
        Self {
            block_size: 0.5,
            block_height: 0.08,
            noise: 0.04,
            platform_size: 1.0,
        }
    }
}

impl TiltedSquaresConfig {
    fn validate(&self, tile_size: f64) -> Result<(), TerrainError> {
        let archetype = Archetype::TiltedSquares;
        check_positive(archetype, "block_size", self.block_size)?;
        check_positive(archetype, "block_height", self.block_height)?;
        if !(self.noise.is_finite() && self.noise >= 0.0 && self.noise < self.block_height) {
            return Err(invalid(
                archetype,
                format!(
                    "noise {} must lie in [0, block_height ({}))",
                    self.noise, self.block_height
                ),
            ));
        }
        check_platform(archetype, self.platform_size, tile_size)
    }
}

impl TileGenerator for TiltedSquaresConfig {
    fn archetype(&self) -> Archetype {
        Archetype::TiltedSquares
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        self.validate(tile_size)?;
        let archetype = Archetype::TiltedSquares;

        let block_height = self.block_height * difficulty;
        let noise = self.noise * difficulty;
        let info = TileInfo {
            archetype,
            difficulty,
            tile_size,
            params: TileParams::TiltedSquares {
                block_size: self.block_size,
                block_height,
                noise,
                platform_size: self.platform_size,
            },
        };

        if block_height == 0.0 {
            return Ok(Tile {
                mesh: square_plane(tile_center(tile_size), tile_size, 0.0)?,
                info,
            });
        }

        let grid = CellGrid::new(archetype, tile_size, self.block_size)?;
        let mut mesh = grid.border()?;
        for i in 0..grid.count() {
            for j in 0..grid.count() {
                let center = grid.cell_center(i, j);
                if grid.overlaps_platform(i, j, self.platform_size) {
                    mesh.append(&square_plane(center, grid.cell_size(), 0.0)?)?;
                    continue;
                }
                let (rise_x, rise_y) = if noise > 0.0 {
                    (
                        rng.random_range(-noise..=noise),
                        rng.random_range(-noise..=noise),
                    )
                } else {
                    (0.0, 0.0)
                };
                let heights =
                    CORNERS.map(|(sx, sy)| block_height + (sx * rise_x + sy * rise_y) / 2.0);
                mesh.append(&tilted_block(center, grid.cell_size(), 0.0, heights)?)?;
            }
        }

        Ok(Tile { mesh, info })
    }
}
