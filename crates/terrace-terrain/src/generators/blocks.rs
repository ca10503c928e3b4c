//! Random blocks: a grid of square blocks with independently drawn heights.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{square_block, square_plane};

use super::layout::CellGrid;
use super::{check_inputs, check_non_negative, check_platform, check_positive, invalid};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// Random block parameters at full difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    /// Side of each block cell.
    pub block_size: f64,
    /// Lower bound of the block height range.
    pub min_block_height: f64,
    /// Upper bound of the block height range.
    pub max_block_height: f64,
    /// Half-width of the uniform jitter added to each block.
    pub noise: f64,
    /// Side of the flat central platform.
    pub platform_size: f64,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            block_size: 0.5,
            min_block_height: 0.0,
            max_block_height: 0.1,
            noise: 0.02,
            platform_size: 1.0,
        }
    }
}

impl BlocksConfig {
    fn validate(&self, tile_size: f64) -> Result<(), TerrainError> {
        let archetype = Archetype::RandomBlocks;
        check_positive(archetype, "block_size", self.block_size)?;
        check_non_negative(archetype, "min_block_height", self.min_block_height)?;
        check_non_negative(archetype, "max_block_height", self.max_block_height)?;
        check_non_negative(archetype, "noise", self.noise)?;
        if self.min_block_height > self.max_block_height {
            return Err(invalid(
                archetype,
                "min_block_height exceeds max_block_height",
            ));
        }
        check_platform(archetype, self.platform_size, tile_size)
    }
}

impl TileGenerator for BlocksConfig {
    fn archetype(&self) -> Archetype {
        Archetype::RandomBlocks
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        self.validate(tile_size)?;

        let low = self.min_block_height * difficulty;
        let high = self.max_block_height * difficulty;
        let noise = self.noise * difficulty;

        let grid = CellGrid::new(Archetype::RandomBlocks, tile_size, self.block_size)?;
        let mut mesh = grid.border()?;

        for i in 0..grid.count() {
            for j in 0..grid.count() {
                let center = grid.cell_center(i, j);
                if grid.overlaps_platform(i, j, self.platform_size) {
                    mesh.append(&square_plane(center, grid.cell_size(), 0.0)?)?;
                    continue;
                }
                let mut height = if high > low {
                    rng.random_range(low..high)
                } else {
                    low
                };
                if noise > 0.0 {
                    height += rng.random_range(-noise..=noise);
                }
                mesh.append(&square_block(center, grid.cell_size(), 0.0, height)?)?;
            }
        }

        Ok(Tile {
            mesh,
            info: TileInfo {
                archetype: Archetype::RandomBlocks,
                difficulty,
                tile_size,
                params: TileParams::Blocks {
                    block_size: self.block_size,
                    min_block_height: low,
                    max_block_height: high,
                    noise,
                    platform_size: self.platform_size,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::*;

    #[test]
    fn test_footprint_and_platform() {
        let config = BlocksConfig::default();
        for d in DIFFICULTIES {
            let tile = config.generate(8.0, d, &mut rng()).unwrap();
            assert_footprint(&tile.mesh, 8.0);
            assert_platform_flat(&tile.mesh, 8.0, 1.0);
        }
    }

    #[test]
    fn test_heights_within_scaled_range() {
        let config = BlocksConfig::default();
        let tile = config.generate(8.0, 0.5, &mut rng()).unwrap();
        let (lo, hi) = tile.mesh.z_range().unwrap();
        assert!(lo >= -0.01 - EPSILON);
        assert!(hi <= 0.05 + 0.01 + EPSILON);
    }

    #[test]
    fn test_zero_difficulty_is_flat() {
        let tile = BlocksConfig::default().generate(8.0, 0.0, &mut rng()).unwrap();
        assert_eq!(tile.mesh.z_range(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_same_rng_same_tile() {
        let config = BlocksConfig::default();
        let a = config.generate(8.0, 1.0, &mut rng()).unwrap();
        let b = config.generate(8.0, 1.0, &mut rng()).unwrap();
        assert_eq!(a.mesh, b.mesh);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = BlocksConfig {
            min_block_height: 0.2,
            max_block_height: 0.1,
            ..Default::default()
        };
        assert!(config.generate(8.0, 1.0, &mut rng()).is_err());
    }
}
