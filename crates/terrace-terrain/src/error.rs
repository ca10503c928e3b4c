//! Terrain generation error types.

use terrace_mesh::GeometryError;

use crate::archetype::Archetype;

/// Errors that can occur while generating tiles or composing a world.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A primitive was requested with invalid dimensions.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Difficulty outside `[0, 1]` (or NaN).
    #[error("difficulty must lie in [0, 1], got {0}")]
    DifficultyOutOfRange(f64),

    /// Tile side length is zero, negative or not finite.
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f64),

    /// A generator parameter does not fit the tile it is asked to build.
    #[error("invalid {archetype} parameters: {reason}")]
    InvalidParameters {
        archetype: Archetype,
        reason: String,
    },

    /// A proportion weight is negative or not finite.
    #[error("weight for {archetype} must be finite and non-negative, got {weight}")]
    InvalidWeight { archetype: Archetype, weight: f64 },

    /// Every archetype has zero weight.
    #[error("at least one terrain archetype must have a positive weight")]
    NoArchetypes,

    /// The world needs at least one row and one difficulty level.
    #[error("world must have at least one row and one level (rows: {rows}, levels: {levels})")]
    EmptyWorld { rows: usize, levels: usize },
}
