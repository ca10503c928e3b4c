//! One generator per terrain archetype.
//!
//! Each generator maps a difficulty in `[0, 1]` to concrete parameters, builds
//! a tile on `[0, tile_size]²` out of primitives, and leaves the central
//! platform flat at zero elevation.

mod blocks;
mod checkerboard;
mod flat;
mod layout;
mod perlin;
mod slope;
mod square_centric;
mod stairs;
mod tilted_squares;

pub use blocks::BlocksConfig;
pub use checkerboard::CheckerConfig;
pub use flat::FlatGenerator;
pub use perlin::PerlinConfig;
pub use slope::SlopeConfig;
pub use square_centric::SquareCentricConfig;
pub use stairs::{StairDirection, Stairs, StairsConfig};
pub use tilted_squares::TiltedSquaresConfig;

use glam::DVec2;

use crate::archetype::Archetype;
use crate::error::TerrainError;

/// Slack used when turning lengths into integer counts.
const COUNT_EPSILON: f64 = 1e-9;

/// `floor(length / unit)`, tolerant of values that land a hair below an integer.
fn fit_count(length: f64, unit: f64) -> usize {
    ((length / unit) + COUNT_EPSILON).floor().max(0.0) as usize
}

fn tile_center(tile_size: f64) -> DVec2 {
    DVec2::splat(tile_size / 2.0)
}

fn check_inputs(tile_size: f64, difficulty: f64) -> Result<(), TerrainError> {
    if !(tile_size.is_finite() && tile_size > 0.0) {
        return Err(TerrainError::InvalidTileSize(tile_size));
    }
    if !(0.0..=1.0).contains(&difficulty) {
        return Err(TerrainError::DifficultyOutOfRange(difficulty));
    }
    Ok(())
}

fn invalid(archetype: Archetype, reason: impl Into<String>) -> TerrainError {
    TerrainError::InvalidParameters {
        archetype,
        reason: reason.into(),
    }
}

fn check_positive(archetype: Archetype, name: &str, value: f64) -> Result<(), TerrainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(archetype, format!("{name} must be positive, got {value}")))
    }
}

fn check_non_negative(archetype: Archetype, name: &str, value: f64) -> Result<(), TerrainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(archetype, format!("{name} must be non-negative, got {value}")))
    }
}

fn check_platform(
    archetype: Archetype,
    platform_size: f64,
    tile_size: f64,
) -> Result<(), TerrainError> {
    check_positive(archetype, "platform_size", platform_size)?;
    if platform_size >= tile_size {
        return Err(invalid(
            archetype,
            format!("platform_size {platform_size} must be smaller than the tile ({tile_size})"),
        ));
    }
    Ok(())
}
