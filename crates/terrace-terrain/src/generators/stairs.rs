//! Pyramid stairs: concentric square steps around a flat central platform.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrace_mesh::{square_plane, square_plane_with_hole, square_wall};

use super::{check_inputs, check_platform, check_positive, fit_count, tile_center};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// Stairs parameters at full difficulty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairsConfig {
    /// Horizontal depth of each step, in meters.
    pub step_width: f64,
    /// Rise of each step at difficulty 1.
    pub step_height: f64,
    /// Side of the flat central platform.
    pub platform_size: f64,
}

impl Default for StairsConfig {
    fn default() -> Self {
        Self {
            step_width: 0.6,
            step_height: 0.08,
            platform_size: 1.0,
        }
    }
}

/// Whether steps climb or descend when walking away from the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StairDirection {
    Up,
    Down,
}

impl StairDirection {
    fn sign(self) -> f64 {
        match self {
            StairDirection::Up => 1.0,
            StairDirection::Down => -1.0,
        }
    }
}

/// Stairs generator for one direction.
#[derive(Clone, Debug)]
pub struct Stairs {
    pub config: StairsConfig,
    pub direction: StairDirection,
}

impl Stairs {
    pub fn new(config: StairsConfig, direction: StairDirection) -> Self {
        Self { config, direction }
    }

    /// Number of full steps between the platform and the tile edge.
    pub fn num_steps(&self, tile_size: f64) -> usize {
        fit_count(
            (tile_size - self.config.platform_size) / 2.0,
            self.config.step_width,
        )
    }

    /// Elevation of step `index` (0 = innermost) at the given difficulty.
    pub fn step_elevation(&self, index: usize, difficulty: f64) -> f64 {
        self.direction.sign() * self.config.step_height * difficulty * (index as f64 + 1.0)
    }
}

impl TileGenerator for Stairs {
    fn archetype(&self) -> Archetype {
        match self.direction {
            StairDirection::Up => Archetype::StairsUp,
            StairDirection::Down => Archetype::StairsDown,
        }
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        _rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        let archetype = self.archetype();
        let StairsConfig {
            step_width,
            step_height,
            platform_size,
        } = self.config;
        check_positive(archetype, "step_width", step_width)?;
        check_platform(archetype, platform_size, tile_size)?;

        let rise = step_height * difficulty;
        let num_steps = self.num_steps(tile_size);
        let center = tile_center(tile_size);

        let info = TileInfo {
            archetype,
            difficulty,
            tile_size,
            params: TileParams::Stairs {
                step_width,
                step_height: rise,
                platform_size,
                num_steps,
                going_up: self.direction == StairDirection::Up,
            },
        };

        if rise == 0.0 || num_steps == 0 {
            return Ok(Tile {
                mesh: square_plane(center, tile_size, 0.0)?,
                info,
            });
        }

        let mut mesh = square_plane(center, platform_size, 0.0)?;
        let mut previous = 0.0;
        for i in 0..num_steps {
            let inner = platform_size + 2.0 * step_width * i as f64;
            let outer = if i == num_steps - 1 {
                tile_size
            } else {
                platform_size + 2.0 * step_width * (i + 1) as f64
            };
            let elevation = self.step_elevation(i, difficulty);

            mesh.append(&square_plane_with_hole(center, outer, inner, elevation)?)?;

            // The riser faces the lower side: inward when climbing, outward when descending.
            let riser = square_wall(center, inner, previous, elevation - previous)?;
            match self.direction {
                StairDirection::Up => mesh.append(&riser.flipped())?,
                StairDirection::Down => mesh.append(&riser)?,
            }
            previous = elevation;
        }

        Ok(Tile { mesh, info })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::*;

    fn up() -> Stairs {
        Stairs::new(StairsConfig::default(), StairDirection::Up)
    }

    fn down() -> Stairs {
        Stairs::new(StairsConfig::default(), StairDirection::Down)
    }

    #[test]
    fn test_default_step_count() {
        // (8 - 1) / 2 / 0.6 = 5.83
        assert_eq!(up().num_steps(8.0), 5);
    }

    #[test]
    fn test_footprint_and_platform() {
        for stairs in [up(), down()] {
            for d in DIFFICULTIES {
                let tile = stairs.generate(8.0, d, &mut rng()).unwrap();
                assert_footprint(&tile.mesh, 8.0);
                assert_platform_flat(&tile.mesh, 8.0, 1.0);
            }
        }
    }

    #[test]
    fn test_zero_difficulty_is_flat() {
        let tile = up().generate(8.0, 0.0, &mut rng()).unwrap();
        assert_eq!(tile.mesh.triangle_count(), 2);
        assert_eq!(tile.mesh.z_range(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_outer_step_height() {
        let tile = up().generate(8.0, 1.0, &mut rng()).unwrap();
        let (lo, hi) = tile.mesh.z_range().unwrap();
        assert!(lo.abs() < EPSILON);
        assert!((hi - 5.0 * 0.08).abs() < EPSILON);

        let tile = down().generate(8.0, 0.5, &mut rng()).unwrap();
        let (lo, hi) = tile.mesh.z_range().unwrap();
        assert!((lo + 5.0 * 0.04).abs() < EPSILON);
        assert!(hi.abs() < EPSILON);
    }

    #[test]
    fn test_elevation_monotonic_in_difficulty() {
        for i in 0..5 {
            let mut last_up = f64::NEG_INFINITY;
            let mut last_down = f64::INFINITY;
            for d in DIFFICULTIES {
                let e_up = up().step_elevation(i, d);
                let e_down = down().step_elevation(i, d);
                assert!(e_up >= last_up);
                assert!(e_down <= last_down);
                last_up = e_up;
                last_down = e_down;
            }
        }
    }

    #[test]
    fn test_info_records_scaled_height() {
        let tile = down().generate(8.0, 0.5, &mut rng()).unwrap();
        assert_eq!(tile.info.archetype, Archetype::StairsDown);
        match tile.info.params {
            TileParams::Stairs {
                step_height,
                num_steps,
                going_up,
                ..
            } => {
                assert!((step_height - 0.04).abs() < EPSILON);
                assert_eq!(num_steps, 5);
                assert!(!going_up);
            }
            other => panic!("unexpected params {other:?}"),
        }
    }

    #[test]
    fn test_platform_larger_than_tile_rejected() {
        let stairs = Stairs::new(
            StairsConfig {
                platform_size: 9.0,
                ..Default::default()
            },
            StairDirection::Up,
        );
        assert!(matches!(
            stairs.generate(8.0, 1.0, &mut rng()),
            Err(TerrainError::InvalidParameters { .. })
        ));
    }
}
