use glam::DVec2;

/// Axis-aligned rectangle in the horizontal (x, y) plane.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl PlanarBounds {
    /// Create bounds from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounds of the square `[origin, origin + size]` on both axes.
    pub fn square(origin: DVec2, size: f64) -> Self {
        Self::new(origin, origin + DVec2::splat(size))
    }

    /// Grow the bounds to include `p`.
    pub fn include(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns true if the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge or at a corner do not count,
    /// which is how adjacent tiles in a grid meet.
    pub fn intersects_interior(&self, other: &PlanarBounds, eps: f64) -> bool {
        self.min.x < other.max.x - eps
            && self.max.x > other.min.x + eps
            && self.min.y < other.max.y - eps
            && self.max.y > other.min.y + eps
    }

    /// Returns the smallest bounds enclosing both self and other.
    pub fn union(&self, other: &PlanarBounds) -> PlanarBounds {
        PlanarBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Component-wise comparison with tolerance.
    pub fn approx_eq(&self, other: &PlanarBounds, eps: f64) -> bool {
        self.min.abs_diff_eq(other.min, eps) && self.max.abs_diff_eq(other.max, eps)
    }
}
