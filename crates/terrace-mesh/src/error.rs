//! Geometry precondition errors.

/// Errors raised when a primitive is requested with invalid dimensions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A side length was zero, negative or not finite.
    #[error("size must be positive and finite, got {0}")]
    NonPositiveSize(f64),

    /// The hole of a ring is not strictly inside the outer square.
    #[error("hole size {inner} must satisfy 0 < inner < outer ({outer})")]
    InvalidHole {
        /// Outer square side length.
        outer: f64,
        /// Inner square side length.
        inner: f64,
    },

    /// A wall with zero height has no area.
    #[error("wall height must be non-zero")]
    DegenerateWall,

    /// A tilted block corner does not rise above the base.
    #[error("tilted block corner height must be positive, got {0}")]
    NonPositiveCorner(f64),

    /// A merged mesh has more vertices than a `u32` index can address.
    #[error("{0} vertices exceed the u32 index range")]
    IndexOverflow(usize),

    /// A coordinate or height was NaN or infinite.
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}
