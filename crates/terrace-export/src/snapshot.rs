//! Software-rasterized snapshot of a mesh.
//!
//! An orthographic camera looks down on the mesh from an oblique angle. The
//! mesh is fitted to the image, depth-tested with a z-buffer and shaded with a
//! single directional light. Surface color follows the viridis map over the
//! mesh's elevation range.

use glam::{DVec2, DVec3};
use image::{Rgba, RgbaImage};
use terrace_mesh::Mesh;

use crate::colormap::viridis;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AMBIENT: f64 = 0.35;
/// Fraction of the image left empty on each side.
const MARGIN: f64 = 0.05;

/// Orientation of the snapshot camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SnapshotCamera {
    /// Horizontal angle of the eye around the mesh, in degrees from +x.
    pub azimuth_deg: f64,
    /// Angle of the eye above the horizontal plane, in degrees.
    pub elevation_deg: f64,
}

impl Default for SnapshotCamera {
    fn default() -> Self {
        Self {
            azimuth_deg: -60.0,
            elevation_deg: 40.0,
        }
    }
}

/// Orthonormal view basis derived from a camera.
struct ViewBasis {
    right: DVec3,
    up: DVec3,
    forward: DVec3,
}

impl ViewBasis {
    fn new(camera: &SnapshotCamera) -> Self {
        let az = camera.azimuth_deg.to_radians();
        let el = camera.elevation_deg.clamp(1.0, 89.0).to_radians();
        let eye = DVec3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin());
        let forward = -eye;
        let right = forward.cross(DVec3::Z).normalize();
        let up = right.cross(forward);
        Self { right, up, forward }
    }

    /// Screen-plane position and depth (larger is farther).
    fn project(&self, p: DVec3) -> (DVec2, f64) {
        (
            DVec2::new(p.dot(self.right), p.dot(self.up)),
            p.dot(self.forward),
        )
    }
}

/// Render `mesh` into a `width × height` image with the default camera.
pub fn render_snapshot(mesh: &Mesh, width: u32, height: u32) -> RgbaImage {
    render_snapshot_with(mesh, width, height, &SnapshotCamera::default())
}

pub(crate) fn render_snapshot_with(
    mesh: &Mesh,
    width: u32,
    height: u32,
    camera: &SnapshotCamera,
) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);
    let Some((z_min, z_max)) = mesh.z_range() else {
        return image;
    };
    if width == 0 || height == 0 {
        return image;
    }

    let view = ViewBasis::new(camera);
    let projected: Vec<(DVec2, f64)> = mesh.vertices.iter().map(|&v| view.project(v)).collect();

    let (lo, hi) = projected.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), (p, _)| (lo.min(*p), hi.max(*p)),
    );
    let extent = (hi - lo).max(DVec2::splat(1e-9));
    let size = DVec2::new(width as f64, height as f64);
    let scale = ((size * (1.0 - 2.0 * MARGIN)) / extent).min_element();
    let center = (lo + hi) / 2.0;
    let to_pixel = |p: DVec2| {
        let d = (p - center) * scale;
        DVec2::new(size.x / 2.0 + d.x, size.y / 2.0 - d.y)
    };
    let screen: Vec<DVec2> = projected.iter().map(|(p, _)| to_pixel(*p)).collect();

    let z_span = z_max - z_min;
    let shade_t: Vec<f64> = mesh
        .vertices
        .iter()
        .map(|v| if z_span > 0.0 { (v.z - z_min) / z_span } else { 0.5 })
        .collect();

    // Light comes from over the viewer's shoulder.
    let light = (-view.forward + view.right * 0.3 + DVec3::Z * 0.5).normalize();
    let mut depth = vec![f64::INFINITY; (width as usize) * (height as usize)];

    for tri in &mesh.triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        let normal = (mesh.vertices[b] - mesh.vertices[a]).cross(mesh.vertices[c] - mesh.vertices[a]);
        let Some(normal) = normal.try_normalize() else {
            continue;
        };
        let intensity = AMBIENT + (1.0 - AMBIENT) * normal.dot(light).abs();

        let (pa, pb, pc) = (screen[a], screen[b], screen[c]);
        let area = (pb - pa).perp_dot(pc - pa);
        if area.abs() < 1e-12 {
            continue;
        }

        let min = pa.min(pb).min(pc).floor().max(DVec2::ZERO);
        let max = pa.max(pb).max(pc).ceil().min(size - DVec2::ONE);
        if min.x > max.x || min.y > max.y {
            continue;
        }

        for py in min.y as u32..=max.y as u32 {
            for px in min.x as u32..=max.x as u32 {
                let p = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                let w0 = (pc - pb).perp_dot(p - pb) / area;
                let w1 = (pa - pc).perp_dot(p - pc) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * projected[a].1 + w1 * projected[b].1 + w2 * projected[c].1;
                let slot = py as usize * width as usize + px as usize;
                if z >= depth[slot] {
                    continue;
                }
                depth[slot] = z;

                let t = w0 * shade_t[a] + w1 * shade_t[b] + w2 * shade_t[c];
                let [r, g, bl] = viridis(t).map(|ch| (ch as f64 * intensity).round().min(255.0) as u8);
                image.put_pixel(px, py, Rgba([r, g, bl, 255]));
            }
        }
    }

    tracing::debug!(
        width,
        height,
        triangles = mesh.triangle_count(),
        "rendered snapshot"
    );
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrace_mesh::{square_block, square_plane};

    fn covered(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| **p != BACKGROUND).count()
    }

    #[test]
    fn test_empty_mesh_gives_background() {
        let image = render_snapshot(&Mesh::new(), 64, 48);
        assert_eq!(image.dimensions(), (64, 48));
        assert_eq!(covered(&image), 0);
    }

    #[test]
    fn test_plane_is_drawn_and_fitted() {
        let plane = square_plane(DVec2::splat(4.0), 8.0, 0.0).unwrap();
        let image = render_snapshot(&plane, 200, 100);
        let drawn = covered(&image);
        assert!(drawn > 200 * 100 / 10, "only {drawn} pixels drawn");
        // Margins stay empty.
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(199, 99), BACKGROUND);
    }

    #[test]
    fn test_elevation_changes_color() {
        let mut mesh = square_plane(DVec2::splat(4.0), 8.0, 0.0).unwrap();
        mesh.append(&square_block(DVec2::splat(4.0), 2.0, 0.0, 1.0).unwrap()).unwrap();
        let image = render_snapshot(&mesh, 160, 120);
        let distinct: std::collections::HashSet<_> = image
            .pixels()
            .filter(|p| **p != BACKGROUND)
            .map(|p| p.0)
            .collect();
        assert!(distinct.len() > 2);
    }

    #[test]
    fn test_view_basis_is_orthonormal() {
        let view = ViewBasis::new(&SnapshotCamera::default());
        assert!((view.right.length() - 1.0).abs() < 1e-12);
        assert!((view.up.length() - 1.0).abs() < 1e-12);
        assert!(view.right.dot(view.up).abs() < 1e-12);
        assert!(view.forward.z < 0.0, "camera must look down");
        assert!(view.up.z > 0.0);
    }
}
