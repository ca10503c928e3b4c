//! Checkerboard: alternating raised and flat cells inside a flat border.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{square_block, square_plane};

use super::layout::CellGrid;
use super::{check_inputs, check_non_negative, check_platform, check_positive, tile_center};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// Checkerboard parameters.
///
/// Difficulty does not change the geometry unless `scale_with_difficulty` is
/// set, in which case block height and noise scale linearly with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub block_size: f64,
    pub block_height: f64,
    /// Half-width of the uniform jitter added to raised cells.
    pub noise: f64,
    pub platform_size: f64,
    pub scale_with_difficulty: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            block_size: 0.5,
            block_height: 0.09,
            noise: 0.02,
            platform_size: 1.0,
            scale_with_difficulty: false,
        }
    }
}

impl TileGenerator for CheckerConfig {
    fn archetype(&self) -> Archetype {
        Archetype::Checkerboard
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        let archetype = Archetype::Checkerboard;
        check_positive(archetype, "block_size", self.block_size)?;
        check_non_negative(archetype, "block_height", self.block_height)?;
        check_non_negative(archetype, "noise", self.noise)?;
        check_platform(archetype, self.platform_size, tile_size)?;

        let scale = if self.scale_with_difficulty {
            difficulty
        } else {
            1.0
        };
        let block_height = self.block_height * scale;
        let noise = self.noise * scale;

        let info = TileInfo {
            archetype,
            difficulty,
            tile_size,
            params: TileParams::Checkerboard {
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
                let raised = (i + j) % 2 == 0 && !grid.overlaps_platform(i, j, self.platform_size);
                if raised {
                    let jitter = if noise > 0.0 {
                        rng.random_range(-noise..=noise)
                    } else {
                        0.0
                    };
                    mesh.append(&square_block(
                        center,
                        grid.cell_size(),
                        0.0,
                        block_height + jitter,
                    )?)?;
                } else {
                    mesh.append(&square_plane(center, grid.cell_size(), 0.0)?)?;
                }
            }
        }

        Ok(Tile { mesh, info })
    }
}
