//! Square cell grid used by the block-based archetypes.
//!
//! The tile is split into a one-cell flat border ring and an inner grid of
//! `count × count` cells, centered so the border absorbs any remainder when
//! the tile is not a whole number of cells.

use glam::DVec2;
use terrace_mesh::{Mesh, square_plane_with_hole};

use super::{fit_count, invalid};
use crate::archetype::Archetype;
use crate::error::TerrainError;

const OVERLAP_EPSILON: f64 = 1e-9;

pub(crate) struct CellGrid {
    tile_size: f64,
    cell_size: f64,
    count: usize,
    origin: f64,
}

impl CellGrid {
    pub fn new(archetype: Archetype, tile_size: f64, cell_size: f64) -> Result<Self, TerrainError> {
        let total = fit_count(tile_size, cell_size);
        if total < 3 {
            return Err(invalid(
                archetype,
                format!("block_size {cell_size} leaves no room for blocks inside the border"),
            ));
        }
        let count = total - 2;
        let inner = count as f64 * cell_size;
        Ok(Self {
            tile_size,
            cell_size,
            count,
            origin: (tile_size - inner) / 2.0,
        })
    }

    /// Cells per side of the inner grid.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cell_center(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(
            self.origin + (i as f64 + 0.5) * self.cell_size,
            self.origin + (j as f64 + 0.5) * self.cell_size,
        )
    }

    /// Whether cell `(i, j)` shares any area with the central platform.
    pub fn overlaps_platform(&self, i: usize, j: usize, platform_size: f64) -> bool {
        let d = (self.cell_center(i, j) - DVec2::splat(self.tile_size / 2.0)).abs();
        let reach = (platform_size + self.cell_size) / 2.0 - OVERLAP_EPSILON;
        d.x < reach && d.y < reach
    }

    /// The flat ring between the inner grid and the tile edge.
    pub fn border(&self) -> Result<Mesh, TerrainError> {
        let inner = self.count as f64 * self.cell_size;
        Ok(square_plane_with_hole(
            DVec2::splat(self.tile_size / 2.0),
            self.tile_size,
            inner,
            0.0,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_matches_whole_cells() {
        let grid = CellGrid::new(Archetype::Checkerboard, 8.0, 0.5).unwrap();
        assert_eq!(grid.count(), 14);
        assert_eq!(grid.cell_center(0, 0), DVec2::splat(0.75));
        assert_eq!(grid.cell_center(13, 13), DVec2::splat(7.25));
    }

    #[test]
    fn test_grid_centers_remainder() {
        let grid = CellGrid::new(Archetype::Checkerboard, 8.2, 0.5).unwrap();
        assert_eq!(grid.count(), 14);
        assert!((grid.cell_center(0, 0).x - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_platform_overlap() {
        let grid = CellGrid::new(Archetype::RandomBlocks, 8.0, 0.5).unwrap();
        // Cells spanning 3.5..4.0 and 4.0..4.5 touch a 1 m platform.
        assert!(grid.overlaps_platform(6, 6, 1.0));
        assert!(grid.overlaps_platform(7, 6, 1.0));
        // 3.0..3.5 only touches its edge.
        assert!(!grid.overlaps_platform(5, 6, 1.0));
    }

    #[test]
    fn test_too_coarse_grid_rejected() {
        assert!(CellGrid::new(Archetype::Checkerboard, 1.0, 0.5).is_err());
    }
}
