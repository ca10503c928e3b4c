//! World composition: a grid of tiles, one archetype per row, difficulty
//! increasing along each row.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use terrace_mesh::{Mesh, PlanarBounds};

use crate::archetype::{Archetype, ArchetypeSettings, TileInfo};
use crate::error::TerrainError;
use crate::heightmap::HeightmapGrid;
use crate::seed::tile_rng;

/// Relative weight of each archetype in the world.
///
/// Archetypes missing from the map have weight zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proportions(pub BTreeMap<Archetype, f64>);

impl Proportions {
    pub fn single(archetype: Archetype) -> Self {
        Self(BTreeMap::from([(archetype, 1.0)]))
    }

    pub fn weight(&self, archetype: Archetype) -> f64 {
        self.0.get(&archetype).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, archetype: Archetype, weight: f64) {
        self.0.insert(archetype, weight);
    }
}

impl Default for Proportions {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Archetype::StairsUp, 0.25),
            (Archetype::StairsDown, 0.25),
            (Archetype::RandomBlocks, 0.25),
            (Archetype::Perlin, 0.25),
        ]))
    }
}

/// Maps rows to archetypes through a normalized cumulative partition.
#[derive(Clone, Debug)]
pub struct ArchetypeSelector {
    entries: Vec<(Archetype, f64)>,
}

impl ArchetypeSelector {
    pub fn new(proportions: &Proportions) -> Result<Self, TerrainError> {
        let mut entries = Vec::new();
        let mut total = 0.0;
        for archetype in Archetype::ALL {
            let weight = proportions.weight(archetype);
            if !weight.is_finite() || weight < 0.0 {
                return Err(TerrainError::InvalidWeight { archetype, weight });
            }
            if weight == 0.0 {
                if proportions.0.contains_key(&archetype) {
                    tracing::warn!(%archetype, "archetype has zero weight and is disabled");
                }
                continue;
            }
            total += weight;
            entries.push((archetype, total));
        }
        if entries.is_empty() {
            return Err(TerrainError::NoArchetypes);
        }
        for entry in &mut entries {
            entry.1 /= total;
        }
        Ok(Self { entries })
    }

    /// Archetype for `row` out of `rows`: the first whose cumulative weight
    /// exceeds `row / rows`.
    pub fn select(&self, row: usize, rows: usize) -> Archetype {
        let position = row as f64 / rows.max(1) as f64;
        self.entries
            .iter()
            .find(|(_, cumulative)| position < *cumulative)
            .or(self.entries.last())
            .map_or(Archetype::Flat, |(archetype, _)| *archetype)
    }

    /// Enabled archetypes with their normalized cumulative weights.
    pub fn entries(&self) -> &[(Archetype, f64)] {
        &self.entries
    }
}

/// `n` evenly spaced difficulties over `[0, 1]`.
pub fn difficulty_levels(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|k| k as f64 / (n - 1) as f64).collect(),
    }
}

/// Layout and randomness of a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSpec {
    pub tile_size: f64,
    /// Recorded with the output; composition does not use it.
    pub border_size: f64,
    pub num_levels: usize,
    pub num_rows: usize,
    /// Heightmap samples per meter.
    pub resolution: f64,
    pub seed: u64,
    pub proportions: Proportions,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            tile_size: 8.0,
            border_size: 10.0,
            num_levels: 4,
            num_rows: 4,
            resolution: 100.0,
            seed: 0,
            proportions: Proportions::default(),
        }
    }
}

impl WorldSpec {
    /// Planar extent covered by the tile grid.
    pub fn extent(&self) -> PlanarBounds {
        PlanarBounds::new(
            DVec2::ZERO,
            DVec2::new(
                self.num_levels as f64 * self.tile_size,
                self.num_rows as f64 * self.tile_size,
            ),
        )
    }

    /// Heightmap grid over the whole world at the configured resolution.
    pub fn heightmap_grid(&self) -> HeightmapGrid {
        let extent = self.extent();
        HeightmapGrid::from_density(
            (extent.min.x, extent.max.x),
            (extent.min.y, extent.max.y),
            self.resolution,
        )
    }
}

/// The level-0 tile description of one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowInfo {
    pub row: usize,
    pub archetype: Archetype,
    pub info: TileInfo,
}

/// Everything needed to reproduce a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub tile_size: f64,
    pub border_size: f64,
    pub num_levels: usize,
    pub num_rows: usize,
    pub resolution: f64,
    pub seed: u64,
    pub proportions: Proportions,
    pub rows: Vec<RowInfo>,
}

/// A composed world.
#[derive(Clone, Debug)]
pub struct World {
    pub mesh: Mesh,
    pub rows: Vec<RowInfo>,
    /// Planar bounds of every placed tile mesh, row-major.
    pub tile_bounds: Vec<PlanarBounds>,
}

impl World {
    pub fn record(&self, spec: &WorldSpec) -> GenerationRecord {
        GenerationRecord {
            tile_size: spec.tile_size,
            border_size: spec.border_size,
            num_levels: spec.num_levels,
            num_rows: spec.num_rows,
            resolution: spec.resolution,
            seed: spec.seed,
            proportions: spec.proportions.clone(),
            rows: self.rows.clone(),
        }
    }
}

/// Generate every tile of the world and merge them into one mesh.
///
/// Tile `(row, level)` is shifted by `(level * tile_size, row * tile_size)`.
pub fn compose_world(spec: &WorldSpec, settings: &ArchetypeSettings) -> Result<World, TerrainError> {
    if spec.num_rows == 0 || spec.num_levels == 0 {
        return Err(TerrainError::EmptyWorld {
            rows: spec.num_rows,
            levels: spec.num_levels,
        });
    }
    if !spec.tile_size.is_finite() || spec.tile_size <= 0.0 {
        return Err(TerrainError::InvalidTileSize(spec.tile_size));
    }

    let selector = ArchetypeSelector::new(&spec.proportions)?;
    let difficulties = difficulty_levels(spec.num_levels);

    let mut mesh = Mesh::new();
    let mut rows = Vec::with_capacity(spec.num_rows);
    let mut tile_bounds = Vec::with_capacity(spec.num_rows * spec.num_levels);

    for row in 0..spec.num_rows {
        let archetype = selector.select(row, spec.num_rows);
        tracing::info!(row, %archetype, "generating row");

        for (level, &difficulty) in difficulties.iter().enumerate() {
            let mut rng = tile_rng(spec.seed, row, level);
            let mut tile = settings.generate(archetype, spec.tile_size, difficulty, &mut rng)?;

            let origin = DVec2::new(level as f64, row as f64) * spec.tile_size;
            tile.mesh.translate(origin.extend(0.0));
            tracing::debug!(
                row,
                level,
                difficulty,
                vertices = tile.mesh.vertex_count(),
                triangles = tile.mesh.triangle_count(),
                "tile generated"
            );

            mesh.append(&tile.mesh)?;
            tile_bounds.push(
                tile.mesh
                    .planar_bounds()
                    .unwrap_or_else(|| PlanarBounds::square(origin, spec.tile_size)),
            );
            if level == 0 {
                rows.push(RowInfo {
                    row,
                    archetype,
                    info: tile.info,
                });
            }
        }
    }

    tracing::info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "world composed"
    );

    Ok(World {
        mesh,
        rows,
        tile_bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(Archetype, f64)]) -> Proportions {
        Proportions(pairs.iter().copied().collect())
    }

    #[test]
    fn test_default_proportions_split_rows() {
        let selector = ArchetypeSelector::new(&Proportions::default()).unwrap();
        let chosen: Vec<_> = (0..4).map(|r| selector.select(r, 4)).collect();
        assert_eq!(
            chosen,
            vec![
                Archetype::StairsUp,
                Archetype::StairsDown,
                Archetype::RandomBlocks,
                Archetype::Perlin,
            ]
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let p = weights(&[(Archetype::Perlin, 3.0), (Archetype::Flat, 1.0)]);
        let a = ArchetypeSelector::new(&p).unwrap();
        let b = ArchetypeSelector::new(&p).unwrap();
        for row in 0..8 {
            assert_eq!(a.select(row, 8), b.select(row, 8));
        }
        let rows: Vec<_> = (0..8).map(|r| a.select(r, 8)).collect();
        assert_eq!(rows.iter().filter(|&&x| x == Archetype::Perlin).count(), 6);
    }

    #[test]
    fn test_zero_weights_are_dropped() {
        let p = weights(&[(Archetype::StairsUp, 0.0), (Archetype::Checkerboard, 2.0)]);
        let selector = ArchetypeSelector::new(&p).unwrap();
        assert_eq!(selector.entries(), &[(Archetype::Checkerboard, 1.0)]);
    }

    #[test]
    fn test_rejects_bad_weights() {
        let p = weights(&[(Archetype::Perlin, 0.0)]);
        assert!(matches!(
            ArchetypeSelector::new(&p),
            Err(TerrainError::NoArchetypes)
        ));

        let p = weights(&[(Archetype::Perlin, -1.0)]);
        assert!(matches!(
            ArchetypeSelector::new(&p),
            Err(TerrainError::InvalidWeight { .. })
        ));

        let p = weights(&[(Archetype::Flat, f64::NAN)]);
        assert!(ArchetypeSelector::new(&p).is_err());
    }

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(difficulty_levels(1), vec![0.0]);
        assert_eq!(difficulty_levels(3), vec![0.0, 0.5, 1.0]);
        let four = difficulty_levels(4);
        assert_eq!(four.len(), 4);
        assert!(four.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(four[3], 1.0);
    }

    #[test]
    fn test_compose_places_tiles_row_major() {
        let spec = WorldSpec {
            num_rows: 2,
            num_levels: 3,
            proportions: Proportions::single(Archetype::Flat),
            ..Default::default()
        };
        let world = compose_world(&spec, &ArchetypeSettings::default()).unwrap();
        assert_eq!(world.tile_bounds.len(), 6);
        assert_eq!(world.tile_bounds[4].min, DVec2::new(8.0, 8.0));
        assert_eq!(world.rows.len(), 2);
        assert_eq!(world.mesh.vertex_count(), 6 * 4);
        let bounds = world.mesh.planar_bounds().unwrap();
        assert!(bounds.approx_eq(&spec.extent(), 1e-9));
    }

    #[test]
    fn test_compose_rejects_empty_world() {
        let spec = WorldSpec {
            num_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            compose_world(&spec, &ArchetypeSettings::default()),
            Err(TerrainError::EmptyWorld { .. })
        ));
    }

    #[test]
    fn test_record_carries_rows() {
        let spec = WorldSpec {
            num_rows: 1,
            num_levels: 2,
            proportions: Proportions::single(Archetype::Checkerboard),
            ..Default::default()
        };
        let world = compose_world(&spec, &ArchetypeSettings::default()).unwrap();
        let record = world.record(&spec);
        assert_eq!(record.rows[0].archetype, Archetype::Checkerboard);
        assert_eq!(record.rows[0].info.difficulty, 0.0);
        let json = serde_json::to_string(&record).unwrap();
        let back: GenerationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_heightmap_grid_covers_world() {
        let spec = WorldSpec {
            resolution: 10.0,
            ..Default::default()
        };
        let grid = spec.heightmap_grid();
        assert_eq!((grid.rows, grid.cols), (320, 320));
        assert_eq!(grid.x_range, (0.0, 32.0));
    }
}
