//! Indexed triangle mesh with concatenation and rigid translation.

use glam::{DVec2, DVec3};

use crate::bounds::PlanarBounds;
use crate::error::GeometryError;

/// An indexed triangle mesh in world units (meters), z up.
///
/// Triangles are counter-clockwise when seen from the side their normal
/// points to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Vertex index triples, one per triangle.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw vertex and triangle lists.
    pub fn from_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        debug_assert!(
            triangles
                .iter()
                .flatten()
                .all(|&i| (i as usize) < vertices.len()),
            "triangle index out of range"
        );
        Self {
            vertices,
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append `other` to this mesh, shifting its indices past our vertices.
    ///
    /// Vertices shared along a seam are kept as duplicates. Fails when the
    /// merged mesh would need vertex indices beyond `u32::MAX`.
    pub fn append(&mut self, other: &Mesh) -> Result<(), GeometryError> {
        let base = index_base(self.vertices.len(), other.vertices.len())?;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + base, t[1] + base, t[2] + base]),
        );
        Ok(())
    }

    /// Concatenate meshes in iteration order.
    pub fn concatenate<'a>(
        meshes: impl IntoIterator<Item = &'a Mesh>,
    ) -> Result<Mesh, GeometryError> {
        let mut out = Mesh::new();
        for mesh in meshes {
            out.append(mesh)?;
        }
        Ok(out)
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Reverse the orientation of every triangle.
    pub fn flip_winding(&mut self) {
        for t in &mut self.triangles {
            t.swap(1, 2);
        }
    }

    /// Builder-style [`Mesh::flip_winding`].
    pub fn flipped(mut self) -> Self {
        self.flip_winding();
        self
    }

    /// The three corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Horizontal extent of all vertices, `None` for an empty mesh.
    pub fn planar_bounds(&self) -> Option<PlanarBounds> {
        let first = self.vertices.first()?;
        let mut bounds = PlanarBounds::new(first.truncate(), first.truncate());
        for v in &self.vertices[1..] {
            bounds.include(DVec2::new(v.x, v.y));
        }
        Some(bounds)
    }

    /// Lowest and highest vertex elevation, `None` for an empty mesh.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        if self.vertices.is_empty() {
            return None;
        }
        let (lo, hi) = self
            .vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.z), hi.max(v.z))
            });
        Some((lo, hi))
    }
}

/// Index offset for `added` vertices appended after `existing` ones.
fn index_base(existing: usize, added: usize) -> Result<u32, GeometryError> {
    let total = existing.saturating_add(added);
    if total > u32::MAX as usize + 1 {
        return Err(GeometryError::IndexOverflow(total));
    }
    u32::try_from(existing).map_err(|_| GeometryError::IndexOverflow(total))
}
