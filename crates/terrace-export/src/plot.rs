//! Heightmap plot: one pixel per sample with a vertical colorbar.

use image::{Rgba, RgbaImage};
use terrace_terrain::Heightmap;

use crate::colormap::terrain;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Width of the colorbar and of the gap before it.
fn bar_width(cols: u32) -> u32 {
    (cols / 32).max(4)
}

/// Render `heightmap` with the "terrain" colormap.
///
/// Row 0 (lowest y) is drawn at the bottom. Gaps are transparent. A colorbar
/// from the lowest (bottom) to the highest (top) elevation sits to the right.
pub fn render_heightmap(heightmap: &Heightmap) -> RgbaImage {
    let (rows, cols) = heightmap.shape();
    let (rows, cols) = (rows as u32, cols as u32);
    let bar = bar_width(cols);
    let mut image = RgbaImage::from_pixel(cols + 2 * bar, rows, TRANSPARENT);
    if rows == 0 || cols == 0 {
        return image;
    }

    let (lo, hi) = heightmap.min_max().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let normalize = |z: f64| if span > 0.0 { (z - lo) / span } else { 0.5 };

    for row in 0..rows {
        let y = rows - 1 - row;
        for col in 0..cols {
            let z = heightmap.get(row as usize, col as usize);
            if z.is_nan() {
                continue;
            }
            let [r, g, b] = terrain(normalize(z));
            image.put_pixel(col, y, Rgba([r, g, b, 255]));
        }
    }

    for y in 0..rows {
        let t = if rows > 1 {
            (rows - 1 - y) as f64 / (rows - 1) as f64
        } else {
            0.5
        };
        let [r, g, b] = terrain(t);
        for x in cols + bar..cols + 2 * bar {
            image.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    tracing::debug!(rows, cols, low = lo, high = hi, "rendered heightmap plot");
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use terrace_mesh::{square_block, square_plane};
    use terrace_terrain::{HeightmapGrid, rasterize};

    #[test]
    fn test_dimensions_and_gaps() {
        let mesh = square_plane(DVec2::splat(1.0), 2.0, 0.0).unwrap();
        let grid = HeightmapGrid::new((0.0, 4.0), (0.0, 4.0), 40, 40);
        let hm = rasterize(&mesh, &grid);
        let image = render_heightmap(&hm);
        assert_eq!(image.dimensions(), (40 + 8, 40));
        // Sample (row 0, col 0) is on the plane, drawn at the bottom left.
        assert_eq!(image.get_pixel(0, 39).0[3], 255);
        // Sample (row 39, col 39) is a gap, drawn at the top right.
        assert_eq!(image.get_pixel(39, 0).0[3], 0);
        // Gap column before the colorbar stays transparent.
        assert_eq!(image.get_pixel(41, 20).0[3], 0);
    }

    #[test]
    fn test_high_ground_uses_top_of_colormap() {
        let mut mesh = square_plane(DVec2::splat(2.0), 4.0, 0.0).unwrap();
        mesh.append(&square_block(DVec2::new(3.0, 3.0), 2.0, 0.0, 1.0).unwrap()).unwrap();
        let grid = HeightmapGrid::new((0.0, 4.0), (0.0, 4.0), 8, 8);
        let image = render_heightmap(&rasterize(&mesh, &grid));
        let [r, g, b] = terrain(1.0);
        // Sample (row 6, col 6) is at (3.0, 3.0) on the block top.
        assert_eq!(image.get_pixel(6, 1).0, [r, g, b, 255]);
        let [r, g, b] = terrain(0.0);
        assert_eq!(image.get_pixel(0, 7).0, [r, g, b, 255]);
        // Colorbar runs from high (top) to low (bottom).
        let bar_x = 8 + 4;
        assert_eq!(image.get_pixel(bar_x, 7).0, [r, g, b, 255]);
    }
}
