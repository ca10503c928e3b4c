//! Slope pyramid: four ramps between the central platform and a flat rim.
//!
//! Ramps facing ±x are smooth. Ramps facing ±y carry transverse bars.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{Mesh, rect_block, square_plane, square_plane_with_hole};

use super::{check_inputs, check_platform, check_positive, invalid, tile_center};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// Relative positions of the bars along a barred ramp.
const BAR_POSITIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// Slope parameters at full difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeConfig {
    /// Elevation of the rim relative to the platform.
    pub total_height: f64,
    /// Height of the bars above the ramp surface.
    pub bar_height: f64,
    /// Depth of each bar along the ramp.
    pub bar_width: f64,
    pub platform_size: f64,
    /// Width of the flat rim along the tile edge.
    pub border_width: f64,
    /// Climb when walking away from the platform; descend otherwise.
    pub going_up: bool,
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self {
            total_height: 1.0,
            bar_height: 0.2,
            bar_width: 0.2,
            platform_size: 1.0,
            border_width: 1.0,
            going_up: true,
        }
    }
}

/// `v` rotated by `quarters` quarter turns counter-clockwise.
fn rotate(v: DVec2, quarters: usize) -> DVec2 {
    (0..quarters % 4).fold(v, |v, _| v.perp())
}

/// Ramp geometry in the frame of the side facing +x.
struct Ramp {
    center: DVec2,
    /// Half side of the platform.
    inner: f64,
    /// Half side of the rim's hole.
    outer: f64,
    rim: f64,
}

impl Ramp {
    /// Elevation at local distance `x` from the center.
    fn elevation(&self, x: f64) -> f64 {
        self.rim * (x - self.inner) / (self.outer - self.inner)
    }

    fn surface(&self, quarters: usize) -> Mesh {
        let corners = [
            (DVec2::new(self.outer, -self.outer), self.rim),
            (DVec2::new(self.outer, self.outer), self.rim),
            (DVec2::new(self.inner, self.inner), 0.0),
            (DVec2::new(self.inner, -self.inner), 0.0),
        ];
        let vertices = corners
            .iter()
            .map(|&(p, z)| (self.center + rotate(p, quarters)).extend(z))
            .collect();
        Mesh::from_parts(vertices, vec![[0, 1, 2], [2, 3, 0]])
    }

    /// Bars spanning the ramp at each of [`BAR_POSITIONS`].
    fn bars(&self, quarters: usize, width: f64, height: f64) -> Result<Mesh, TerrainError> {
        let mut mesh = Mesh::new();
        for alpha in BAR_POSITIONS {
            let x = self.inner + alpha * (self.outer - self.inner);
            let near = self.elevation(x - width / 2.0);
            let far = self.elevation(x + width / 2.0);
            let base = near.min(far);
            let top = near.max(far) + height - base;

            // Trimmed so the bar stays inside the trapezoid.
            let local_extent = DVec2::new(width, 2.0 * (x - width / 2.0));
            let extent = if quarters % 2 == 0 {
                local_extent
            } else {
                DVec2::new(local_extent.y, local_extent.x)
            };
            let center = self.center + rotate(DVec2::new(x, 0.0), quarters);
            mesh.append(&rect_block(center, extent, base, top)?)?;
        }
        Ok(mesh)
    }
}

impl SlopeConfig {
    fn validate(&self, tile_size: f64) -> Result<(), TerrainError> {
        let archetype = Archetype::Slope;
        check_positive(archetype, "border_width", self.border_width)?;
        check_positive(archetype, "bar_width", self.bar_width)?;
        check_platform(archetype, self.platform_size, tile_size)?;
        for (name, value) in [
            ("total_height", self.total_height),
            ("bar_height", self.bar_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(archetype, format!("{name} must be non-negative, got {value}")));
            }
        }

        let ramp_outer = tile_size - 2.0 * self.border_width;
        if ramp_outer <= self.platform_size {
            return Err(invalid(
                archetype,
                format!(
                    "border_width {} leaves no room for ramps around the platform",
                    self.border_width
                ),
            ));
        }
        let run = (ramp_outer - self.platform_size) / 2.0;
        if self.bar_width > run / 2.0 {
            return Err(invalid(
                archetype,
                format!("bar_width {} does not fit a ramp of length {run}", self.bar_width),
            ));
        }
        Ok(())
    }
}

impl TileGenerator for SlopeConfig {
    fn archetype(&self) -> Archetype {
        Archetype::Slope
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        _rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        self.validate(tile_size)?;

        let sign = if self.going_up { 1.0 } else { -1.0 };
        let total_height = self.total_height * difficulty;
        let bar_height = self.bar_height * difficulty;
        let center = tile_center(tile_size);

        let info = TileInfo {
            archetype: Archetype::Slope,
            difficulty,
            tile_size,
            params: TileParams::Slope {
                total_height,
                bar_height,
                bar_width: self.bar_width,
                platform_size: self.platform_size,
                border_width: self.border_width,
                going_up: self.going_up,
            },
        };

        if total_height == 0.0 {
            return Ok(Tile {
                mesh: square_plane(center, tile_size, 0.0)?,
                info,
            });
        }

        let ramp_outer = tile_size - 2.0 * self.border_width;
        let ramp = Ramp {
            center,
            inner: self.platform_size / 2.0,
            outer: ramp_outer / 2.0,
            rim: sign * total_height,
        };

        let mut mesh = square_plane(center, self.platform_size, 0.0)?;
        mesh.append(&square_plane_with_hole(center, tile_size, ramp_outer, ramp.rim)?)?;
        for quarters in 0..4 {
            mesh.append(&ramp.surface(quarters))?;
            if quarters % 2 == 1 && bar_height > 0.0 {
                mesh.append(&ramp.bars(quarters, self.bar_width, bar_height)?)?;
            }
        }

        Ok(Tile { mesh, info })
    }
}
