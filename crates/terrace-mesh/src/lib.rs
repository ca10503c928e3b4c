//! Triangle meshes and the primitive shapes terrain tiles are assembled from.
//!
//! Meshes are plain vertex/triangle lists. Concatenation never merges shared
//! vertices, so tile meshes can be stitched into a world mesh by appending.

mod bounds;
mod error;
mod mesh;
pub mod primitives;

pub use bounds::PlanarBounds;
pub use error::GeometryError;
pub use mesh::Mesh;
pub use primitives::{
    rect_block, square_block, square_plane, square_plane_with_hole, square_wall, tilted_block,
};
