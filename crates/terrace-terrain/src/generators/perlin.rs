//! Perlin terrain: a regular grid displaced by fractal Perlin noise.
//!
//! The platform square is pinned to zero and blends into the noise over
//! `platform_smoothing_distance`. The tile rim blends to zero over
//! `edge_smoothing_distance`, so neighbouring tiles meet at a common height.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::Mesh;

use super::{
    check_inputs, check_non_negative, check_platform, check_positive, fit_count, invalid,
};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;
use crate::fbm::{PerlinField, PerlinFieldParams};

/// Range of the random noise-space offset drawn per tile.
const OFFSET_RANGE: f64 = 1000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerlinConfig {
    /// Grid vertices per meter.
    pub resolution_per_meter: f64,
    /// Spatial scale of the noise; smaller values give busier terrain.
    pub scale: f64,
    /// Peak noise displacement at difficulty 1.
    pub height_multiplier: f64,
    pub octaves: u32,
    pub platform_size: f64,
    pub platform_smoothing_distance: f64,
    pub edge_smoothing_distance: f64,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            resolution_per_meter: 20.0,
            scale: 0.2,
            height_multiplier: 0.3,
            octaves: 4,
            platform_size: 0.5,
            platform_smoothing_distance: 0.4,
            edge_smoothing_distance: 0.4,
        }
    }
}

/// Linear ramp from 0 at `distance == 0` to 1 at `distance >= span`.
fn ramp(distance: f64, span: f64) -> f64 {
    if distance <= 0.0 {
        0.0
    } else if span <= 0.0 {
        1.0
    } else {
        (distance / span).min(1.0)
    }
}

impl PerlinConfig {
    fn validate(&self, tile_size: f64) -> Result<usize, TerrainError> {
        let archetype = Archetype::Perlin;
        check_positive(archetype, "resolution_per_meter", self.resolution_per_meter)?;
        check_positive(archetype, "scale", self.scale)?;
        check_non_negative(archetype, "height_multiplier", self.height_multiplier)?;
        check_non_negative(
            archetype,
            "platform_smoothing_distance",
            self.platform_smoothing_distance,
        )?;
        check_non_negative(
            archetype,
            "edge_smoothing_distance",
            self.edge_smoothing_distance,
        )?;
        check_platform(archetype, self.platform_size, tile_size)?;

        let cells = fit_count(tile_size, 1.0 / self.resolution_per_meter);
        if cells < 2 {
            return Err(invalid(
                archetype,
                format!(
                    "resolution {} gives fewer than two cells per side",
                    self.resolution_per_meter
                ),
            ));
        }
        Ok(cells)
    }
}

impl TileGenerator for PerlinConfig {
    fn archetype(&self) -> Archetype {
        Archetype::Perlin
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        let cells = self.validate(tile_size)?;

        let amplitude = self.height_multiplier * difficulty;
        let offset = [
            rng.random_range(0.0..OFFSET_RANGE),
            rng.random_range(0.0..OFFSET_RANGE),
        ];
        let field = PerlinField::new(PerlinFieldParams {
            seed: rng.random(),
            octaves: self.octaves,
            base_frequency: 1.0 / self.scale,
            ..Default::default()
        });
        // Stretch the unit field so its bound is exactly `amplitude`.
        let peak = field.max_amplitude();
        let gain = if peak > 0.0 { amplitude / peak } else { 0.0 };

        let step = tile_size / cells as f64;
        let center = tile_size / 2.0;
        let half_platform = self.platform_size / 2.0;
        let side = cells + 1;

        let mut vertices = Vec::with_capacity(side * side);
        for gy in 0..side {
            for gx in 0..side {
                let x = gx as f64 * step;
                let y = gy as f64 * step;

                // Noise is sampled in grid units so its character follows the
                // resolution, not the tile size.
                let nx = (gx as f64 + offset[0]) / cells as f64;
                let ny = (gy as f64 + offset[1]) / cells as f64;
                let base = field.sample(nx, ny) * gain;

                let platform_distance = (x - center).abs().max((y - center).abs()) - half_platform;
                let platform_factor = ramp(
                    platform_distance - 1e-9,
                    self.platform_smoothing_distance,
                );
                let edge_distance = x.min(y).min(tile_size - x).min(tile_size - y);
                let edge_factor = ramp(edge_distance - 1e-9, self.edge_smoothing_distance);

                vertices.push(DVec3::new(x, y, base * platform_factor * edge_factor));
            }
        }

        let mut triangles = Vec::with_capacity(cells * cells * 2);
        for gy in 0..cells {
            for gx in 0..cells {
                let v00 = (gy * side + gx) as u32;
                let v10 = v00 + 1;
                let v01 = v00 + side as u32;
                let v11 = v01 + 1;
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }

        Ok(Tile {
            mesh: Mesh::from_parts(vertices, triangles),
            info: TileInfo {
                archetype: Archetype::Perlin,
                difficulty,
                tile_size,
                params: TileParams::Perlin {
                    resolution_per_meter: self.resolution_per_meter,
                    scale: self.scale,
                    amplitude,
                    octaves: self.octaves,
                    platform_size: self.platform_size,
                    platform_smoothing_distance: self.platform_smoothing_distance,
                    edge_smoothing_distance: self.edge_smoothing_distance,
                    offset,
                },
            },
        })
    }
}
