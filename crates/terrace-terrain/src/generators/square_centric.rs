//! Square-centric obstacles: concentric raised rings around the platform.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{Mesh, square_plane, square_plane_with_hole, square_wall};

use super::{
    COUNT_EPSILON, check_inputs, check_platform, check_positive, fit_count, tile_center,
};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareCentricConfig {
    /// Thickness of each ring obstacle.
    pub step_width: f64,
    /// Ring height at difficulty 1.
    pub step_height: f64,
    /// Distance between the inner edges of consecutive rings.
    pub step_spacing: f64,
    pub platform_size: f64,
}

impl Default for SquareCentricConfig {
    fn default() -> Self {
        Self {
            step_width: 0.3,
            step_height: 0.08,
            step_spacing: 0.7,
            platform_size: 1.0,
        }
    }
}

impl SquareCentricConfig {
    /// Inner side lengths of the rings that fit inside the tile.
    fn ring_sizes(&self, tile_size: f64) -> Vec<f64> {
        let candidates = fit_count(
            (tile_size - self.platform_size) / 2.0,
            self.step_spacing,
        );
        (0..candidates)
            .map(|i| self.platform_size + 2.0 * self.step_spacing * i as f64)
            .filter(|inner| inner + self.step_width <= tile_size + COUNT_EPSILON)
            .collect()
    }
}

/// One ring obstacle: inner wall, top ring and outer wall.
fn ring_obstacle(tile_size: f64, inner: f64, outer: f64, height: f64) -> Result<Mesh, TerrainError> {
    let center = tile_center(tile_size);
    let mut mesh = square_wall(center, inner, 0.0, height)?.flipped();
    mesh.append(&square_plane_with_hole(center, outer, inner, height)?)?;
    mesh.append(&square_wall(center, outer, 0.0, height)?)?;
    Ok(mesh)
}

impl TileGenerator for SquareCentricConfig {
    fn archetype(&self) -> Archetype {
        Archetype::SquareCentric
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        _rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        let archetype = Archetype::SquareCentric;
        check_positive(archetype, "step_width", self.step_width)?;
        check_positive(archetype, "step_spacing", self.step_spacing)?;
        check_platform(archetype, self.platform_size, tile_size)?;

        let height = self.step_height * difficulty;
        let rings = if height > 0.0 {
            self.ring_sizes(tile_size)
        } else {
            Vec::new()
        };

        let mut mesh = square_plane(tile_center(tile_size), tile_size, 0.0)?;
        for &inner in &rings {
            let outer = (inner + self.step_width).min(tile_size);
            mesh.append(&ring_obstacle(tile_size, inner, outer, height)?)?;
        }

        Ok(Tile {
            mesh,
            info: TileInfo {
                archetype,
                difficulty,
                tile_size,
                params: TileParams::SquareCentric {
                    step_width: self.step_width,
                    step_height: height,
                    step_spacing: self.step_spacing,
                    platform_size: self.platform_size,
                    num_rings: rings.len(),
                },
            },
        })
    }
}
