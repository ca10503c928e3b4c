//! Piecewise-linear colormaps over a normalized value in `[0, 1]`.

/// Anchor colors of the viridis map, evenly spaced.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Anchors of the "terrain" map: water blue, green lowlands, pale plains,
/// brown highlands, white peaks.
const TERRAIN: [(f64, [u8; 3]); 6] = [
    (0.0, [51, 51, 153]),
    (0.15, [0, 153, 255]),
    (0.25, [0, 204, 102]),
    (0.5, [255, 255, 153]),
    (0.75, [128, 92, 84]),
    (1.0, [255, 255, 255]),
];

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round().clamp(0.0, 255.0) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Viridis color for `t` (clamped to `[0, 1]`).
pub(crate) fn viridis(t: f64) -> [u8; 3] {
    let scaled = clamp_unit(t) * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    lerp_color(VIRIDIS[i], VIRIDIS[i + 1], scaled - i as f64)
}

/// "Terrain" color for `t` (clamped to `[0, 1]`).
pub(crate) fn terrain(t: f64) -> [u8; 3] {
    let t = clamp_unit(t);
    for pair in TERRAIN.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            return lerp_color(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    TERRAIN[TERRAIN.len() - 1].1
}
