//! Heightmap rasterization: top-surface elevation of a mesh on a regular grid.
//!
//! Each sample drops a vertical probe through the mesh and keeps the highest
//! intersection, so overlapping surfaces (a block standing on a ground plane)
//! resolve to the walkable top. Samples with nothing underneath are gaps and
//! hold `f64::NAN`.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use terrace_mesh::{Mesh, PlanarBounds};

/// Offset of the four auxiliary probes around each sample, in grid cells.
pub const DEFAULT_RAY_OFFSET: f64 = 0.01;

/// Barycentric slack so samples on shared edges hit both neighbours.
const EDGE_EPSILON: f64 = 1e-9;

/// Triangles whose planar projection is thinner than this are vertical.
const VERTICAL_EPSILON: f64 = 1e-12;

/// Upper bound on index bins per axis.
const MAX_BINS_PER_AXIS: usize = 4096;

/// A regular sampling grid over a planar rectangle.
///
/// Sample `(row, col)` sits at `(x_min + col * dx, y_min + row * dy)` where
/// `dx = (x_max - x_min) / cols`; the far edges are not sampled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightmapGrid {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub cols: usize,
    pub rows: usize,
}

impl HeightmapGrid {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), cols: usize, rows: usize) -> Self {
        Self {
            x_range,
            y_range,
            cols,
            rows,
        }
    }

    /// Grid with `samples_per_meter` samples along each meter of both axes.
    pub fn from_density(x_range: (f64, f64), y_range: (f64, f64), samples_per_meter: f64) -> Self {
        let count = |(lo, hi): (f64, f64)| ((hi - lo) * samples_per_meter + 1e-9).floor().max(0.0) as usize;
        Self::new(x_range, y_range, count(x_range), count(y_range))
    }

    /// Distance between neighbouring samples along x and y.
    pub fn spacing(&self) -> DVec2 {
        DVec2::new(
            (self.x_range.1 - self.x_range.0) / self.cols.max(1) as f64,
            (self.y_range.1 - self.y_range.0) / self.rows.max(1) as f64,
        )
    }

    pub fn sample_point(&self, row: usize, col: usize) -> DVec2 {
        let spacing = self.spacing();
        DVec2::new(
            self.x_range.0 + col as f64 * spacing.x,
            self.y_range.0 + row as f64 * spacing.y,
        )
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A grid of top-surface elevations, row-major with rows along y.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    grid: HeightmapGrid,
    values: Vec<f64>,
}

impl Heightmap {
    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.grid.rows, self.grid.cols)
    }

    pub fn grid(&self) -> &HeightmapGrid {
        &self.grid
    }

    /// Elevation at `(row, col)`; NaN marks a gap.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.grid.cols + col]
    }

    /// Row-major samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples with no surface underneath.
    pub fn gap_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Lowest and highest elevation, ignoring gaps.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Rows along y, each running along x.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .chunks(self.grid.cols.max(1))
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Transposed layout: one inner vector per x column, indexed by y.
    pub fn transposed(&self) -> Vec<Vec<f64>> {
        (0..self.grid.cols)
            .map(|col| (0..self.grid.rows).map(|row| self.get(row, col)).collect())
            .collect()
    }
}

/// A non-vertical triangle prepared for planar point queries.
struct ProbeTriangle {
    a: DVec3,
    e0: DVec2,
    e1: DVec2,
    dz0: f64,
    dz1: f64,
    inv_det: f64,
}

impl ProbeTriangle {
    fn new([a, b, c]: [DVec3; 3]) -> Option<Self> {
        let e0 = (b - a).truncate();
        let e1 = (c - a).truncate();
        let det = e0.perp_dot(e1);
        if det.abs() < VERTICAL_EPSILON {
            return None;
        }
        Some(Self {
            a,
            e0,
            e1,
            dz0: b.z - a.z,
            dz1: c.z - a.z,
            inv_det: 1.0 / det,
        })
    }

    /// Elevation of the triangle above `p`, if `p` lies inside its projection.
    fn height_at(&self, p: DVec2) -> Option<f64> {
        let d = p - self.a.truncate();
        let u = d.perp_dot(self.e1) * self.inv_det;
        let v = self.e0.perp_dot(d) * self.inv_det;
        if u >= -EDGE_EPSILON && v >= -EDGE_EPSILON && u + v <= 1.0 + EDGE_EPSILON {
            Some(self.a.z + u * self.dz0 + v * self.dz1)
        } else {
            None
        }
    }
}

/// Uniform planar bins over the mesh, each listing the triangles whose
/// bounding rectangle overlaps it.
struct TriangleIndex {
    triangles: Vec<ProbeTriangle>,
    bounds: PlanarBounds,
    bin_size: DVec2,
    nx: usize,
    ny: usize,
    bins: Vec<Vec<u32>>,
}

impl TriangleIndex {
    fn build(mesh: &Mesh) -> Option<Self> {
        let bounds = mesh.planar_bounds()?;
        let mut triangles = Vec::with_capacity(mesh.triangle_count());
        let mut rects = Vec::with_capacity(mesh.triangle_count());
        for i in 0..mesh.triangle_count() {
            let corners = mesh.triangle(i);
            if let Some(tri) = ProbeTriangle::new(corners) {
                let mut rect = PlanarBounds::new(corners[0].truncate(), corners[1].truncate());
                rect.include(corners[2].truncate());
                triangles.push(tri);
                rects.push(rect);
            }
        }
        if triangles.is_empty() {
            return None;
        }

        let extent = DVec2::new(bounds.width(), bounds.height()).max(DVec2::splat(1e-6));
        let target = (extent.x * extent.y / triangles.len() as f64).sqrt();
        let nx = ((extent.x / target).ceil() as usize).clamp(1, MAX_BINS_PER_AXIS);
        let ny = ((extent.y / target).ceil() as usize).clamp(1, MAX_BINS_PER_AXIS);
        let bin_size = extent / DVec2::new(nx as f64, ny as f64);

        let mut index = Self {
            triangles,
            bounds,
            bin_size,
            nx,
            ny,
            bins: vec![Vec::new(); nx * ny],
        };
        for (i, rect) in rects.iter().enumerate() {
            let (x0, y0) = index.bin_of(rect.min - DVec2::splat(EDGE_EPSILON));
            let (x1, y1) = index.bin_of(rect.max + DVec2::splat(EDGE_EPSILON));
            for by in y0..=y1 {
                for bx in x0..=x1 {
                    index.bins[by * nx + bx].push(i as u32);
                }
            }
        }
        Some(index)
    }

    fn bin_of(&self, p: DVec2) -> (usize, usize) {
        let rel = (p - self.bounds.min) / self.bin_size;
        let clamp = |v: f64, n: usize| (v.floor().max(0.0) as usize).min(n - 1);
        (clamp(rel.x, self.nx), clamp(rel.y, self.ny))
    }

    /// Highest surface above `p`, if any.
    fn top_height(&self, p: DVec2) -> Option<f64> {
        let slack = DVec2::splat(EDGE_EPSILON);
        if !PlanarBounds::new(self.bounds.min - slack, self.bounds.max + slack).contains_point(p) {
            return None;
        }
        let (bx, by) = self.bin_of(p);
        self.bins[by * self.nx + bx]
            .iter()
            .filter_map(|&i| self.triangles[i as usize].height_at(p))
            .reduce(f64::max)
    }
}

/// Rasterize the top surface of `mesh` on `grid` with the default probe offset.
pub fn rasterize(mesh: &Mesh, grid: &HeightmapGrid) -> Heightmap {
    rasterize_with_offset(mesh, grid, DEFAULT_RAY_OFFSET)
}

/// Rasterize with a custom probe offset (in grid cells).
///
/// Each sample takes the highest hit among a probe at the sample point and
/// four probes shifted by `ray_offset` along ±x and ±y, which keeps the top
/// of a raised edge from slipping between adjacent triangles.
pub fn rasterize_with_offset(mesh: &Mesh, grid: &HeightmapGrid, ray_offset: f64) -> Heightmap {
    let mut values = vec![f64::NAN; grid.len()];

    if let Some(index) = TriangleIndex::build(mesh) {
        let spacing = grid.spacing();
        let probes = [
            DVec2::ZERO,
            DVec2::new(ray_offset * spacing.x, 0.0),
            DVec2::new(-ray_offset * spacing.x, 0.0),
            DVec2::new(0.0, ray_offset * spacing.y),
            DVec2::new(0.0, -ray_offset * spacing.y),
        ];
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let p = grid.sample_point(row, col);
                if let Some(h) = probes
                    .iter()
                    .filter_map(|&o| index.top_height(p + o))
                    .reduce(f64::max)
                {
                    values[row * grid.cols + col] = h;
                }
            }
        }
    }

    let heightmap = Heightmap {
        grid: *grid,
        values,
    };
    let gaps = heightmap.gap_count();
    if gaps > 0 {
        tracing::warn!(
            gaps,
            total = grid.len(),
            "heightmap samples with no surface underneath are NaN"
        );
    }
    tracing::debug!(rows = grid.rows, cols = grid.cols, "rasterized heightmap");
    heightmap
}
