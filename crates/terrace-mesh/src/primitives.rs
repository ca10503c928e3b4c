//! Axis-aligned primitives: square planes, rings, walls and blocks.
//!
//! Every primitive is centered on a point of the horizontal plane and returns
//! its own [`Mesh`]. Callers concatenate them into tiles.

use glam::{DVec2, DVec3};

use crate::error::GeometryError;
use crate::mesh::Mesh;

fn check_size(size: f64) -> Result<(), GeometryError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveSize(size))
    }
}

fn check_finite(center: DVec2, heights: &[f64], what: &'static str) -> Result<(), GeometryError> {
    if center.is_finite() && heights.iter().all(|h| h.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(what))
    }
}

/// Corners of a rectangle at elevation `z`, counter-clockwise from (-, -).
fn rect_corners(center: DVec2, half: DVec2, z: f64) -> [DVec3; 4] {
    [
        DVec3::new(center.x - half.x, center.y - half.y, z),
        DVec3::new(center.x + half.x, center.y - half.y, z),
        DVec3::new(center.x + half.x, center.y + half.y, z),
        DVec3::new(center.x - half.x, center.y + half.y, z),
    ]
}

fn square_corners(center: DVec2, half: f64, z: f64) -> [DVec3; 4] {
    rect_corners(center, DVec2::splat(half), z)
}

/// A flat square of side `size` at elevation `height`, facing up.
pub fn square_plane(center: DVec2, size: f64, height: f64) -> Result<Mesh, GeometryError> {
    check_size(size)?;
    check_finite(center, &[height], "square_plane")?;

    let vertices = square_corners(center, size / 2.0, height).to_vec();
    Ok(Mesh::from_parts(vertices, vec![[0, 1, 2], [0, 2, 3]]))
}

/// A flat square ring: the outer square minus a concentric inner square.
///
/// Requires `0 < inner_size < outer_size`.
pub fn square_plane_with_hole(
    center: DVec2,
    outer_size: f64,
    inner_size: f64,
    height: f64,
) -> Result<Mesh, GeometryError> {
    check_size(outer_size)?;
    if !(inner_size.is_finite() && inner_size > 0.0 && inner_size < outer_size) {
        return Err(GeometryError::InvalidHole {
            outer: outer_size,
            inner: inner_size,
        });
    }
    check_finite(center, &[height], "square_plane_with_hole")?;

    let mut vertices = square_corners(center, outer_size / 2.0, height).to_vec();
    vertices.extend(square_corners(center, inner_size / 2.0, height));

    // One trapezoid per side, outer corner k to inner corner k.
    let triangles = vec![
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    Ok(Mesh::from_parts(vertices, triangles))
}

/// The four vertical sides of a square column, from `base_height` to
/// `base_height + wall_height`, facing away from the center.
///
/// A negative `wall_height` extends the wall downward.
pub fn square_wall(
    center: DVec2,
    size: f64,
    base_height: f64,
    wall_height: f64,
) -> Result<Mesh, GeometryError> {
    check_size(size)?;
    check_finite(center, &[base_height, wall_height], "square_wall")?;
    if wall_height == 0.0 {
        return Err(GeometryError::DegenerateWall);
    }

    let lo = base_height.min(base_height + wall_height);
    let hi = base_height.max(base_height + wall_height);
    let half = size / 2.0;

    let mut vertices = square_corners(center, half, lo).to_vec();
    vertices.extend(square_corners(center, half, hi));

    let triangles = vec![
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    Ok(Mesh::from_parts(vertices, triangles))
}

/// A closed rectangular prism of footprint `size × size` spanning
/// `base_height` to `base_height + top_height`.
///
/// A negative `top_height` hangs the prism below `base_height`, so its cap
/// sits at `base_height`. A zero `top_height` collapses to [`square_plane`]
/// at `base_height`.
pub fn square_block(
    center: DVec2,
    size: f64,
    base_height: f64,
    top_height: f64,
) -> Result<Mesh, GeometryError> {
    check_size(size)?;
    rect_block(center, DVec2::splat(size), base_height, top_height)
}

/// [`square_block`] with independent side lengths along x and y.
pub fn rect_block(
    center: DVec2,
    extent: DVec2,
    base_height: f64,
    top_height: f64,
) -> Result<Mesh, GeometryError> {
    check_size(extent.x)?;
    check_size(extent.y)?;
    check_finite(center, &[base_height, top_height], "rect_block")?;

    let half = extent / 2.0;
    if top_height == 0.0 {
        let vertices = rect_corners(center, half, base_height).to_vec();
        return Ok(Mesh::from_parts(vertices, vec![[0, 1, 2], [0, 2, 3]]));
    }

    let lo = base_height.min(base_height + top_height);
    let hi = base_height.max(base_height + top_height);
    Ok(closed_prism(center, half, lo, [hi; 4]))
}

/// A closed block whose top is a plane tilted through four corner heights.
///
/// `corner_heights` are measured from `base_height`, counter-clockwise from
/// the (-, -) corner, and must all be positive.
pub fn tilted_block(
    center: DVec2,
    size: f64,
    base_height: f64,
    corner_heights: [f64; 4],
) -> Result<Mesh, GeometryError> {
    check_size(size)?;
    check_finite(center, &[base_height], "tilted_block")?;
    check_finite(center, &corner_heights, "tilted_block")?;
    if let Some(&h) = corner_heights.iter().find(|&&h| h <= 0.0) {
        return Err(GeometryError::NonPositiveCorner(h));
    }

    let tops = corner_heights.map(|h| base_height + h);
    Ok(closed_prism(center, DVec2::splat(size / 2.0), base_height, tops))
}

/// Bottom at `lo` facing down, top corners at `tops` facing up, four walls
/// facing out. Requires every top above `lo`.
fn closed_prism(center: DVec2, half: DVec2, lo: f64, tops: [f64; 4]) -> Mesh {
    let mut vertices = rect_corners(center, half, lo).to_vec();
    vertices.extend(
        rect_corners(center, half, 0.0)
            .into_iter()
            .zip(tops)
            .map(|(v, z)| DVec3::new(v.x, v.y, z)),
    );
    let triangles = vec![
        // top
        [4, 5, 6],
        [4, 6, 7],
        // walls
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
        // bottom
        [0, 2, 1],
        [0, 3, 2],
    ];
    Mesh::from_parts(vertices, triangles)
}
