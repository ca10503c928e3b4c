//! Binary archive of the world mesh, its heightmap and the generation record.
//!
//! The archive is postcard-encoded and LZ4-compressed with the decompressed
//! size prepended.

use std::path::Path;

use serde::{Deserialize, Serialize};
use terrace_mesh::Mesh;
use terrace_terrain::{GenerationRecord, Heightmap};

use crate::error::ExportError;

/// Bumped whenever the archive layout changes.
pub const ARCHIVE_VERSION: u32 = 1;

/// Everything a downstream consumer needs to rebuild the terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainArchive {
    pub version: u32,
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
    /// Heightmap indexed `[x][y]`; gaps are NaN.
    pub heightmap: Vec<Vec<f64>>,
    pub params: GenerationRecord,
}

impl TerrainArchive {
    pub fn new(mesh: &Mesh, heightmap: &Heightmap, params: GenerationRecord) -> Self {
        Self {
            version: ARCHIVE_VERSION,
            vertices: mesh.vertices.iter().map(|v| v.to_array()).collect(),
            triangles: mesh.triangles.clone(),
            heightmap: heightmap.transposed(),
            params,
        }
    }

    /// The archived mesh.
    pub fn mesh(&self) -> Mesh {
        Mesh::from_parts(
            self.vertices.iter().map(|&v| v.into()).collect(),
            self.triangles.clone(),
        )
    }

    pub fn encode(&self) -> Result<Vec<u8>, ExportError> {
        let bytes = postcard::to_allocvec(self).map_err(|e| ExportError::Codec(e.to_string()))?;
        Ok(lz4_flex::compress_prepend_size(&bytes))
    }

    pub fn decode(compressed: &[u8]) -> Result<Self, ExportError> {
        let bytes = lz4_flex::decompress_size_prepended(compressed)
            .map_err(|e| ExportError::Codec(e.to_string()))?;
        let archive: Self =
            postcard::from_bytes(&bytes).map_err(|e| ExportError::Codec(e.to_string()))?;
        if archive.version != ARCHIVE_VERSION {
            return Err(ExportError::VersionMismatch {
                expected: ARCHIVE_VERSION,
                found: archive.version,
            });
        }
        Ok(archive)
    }
}

/// Write `archive` to `path`.
pub fn write_archive(path: &Path, archive: &TerrainArchive) -> Result<(), ExportError> {
    let compressed = archive.encode()?;
    std::fs::write(path, &compressed)?;
    tracing::debug!(path = %path.display(), bytes = compressed.len(), "wrote terrain archive");
    Ok(())
}

/// Read an archive written by [`write_archive`].
pub fn read_archive(path: &Path) -> Result<TerrainArchive, ExportError> {
    TerrainArchive::decode(&std::fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use terrace_mesh::square_plane;
    use terrace_terrain::{
        Archetype, ArchetypeSettings, HeightmapGrid, Proportions, WorldSpec, compose_world,
        rasterize,
    };

    fn small_world() -> (Mesh, Heightmap, GenerationRecord) {
        let spec = WorldSpec {
            tile_size: 4.0,
            num_rows: 1,
            num_levels: 2,
            resolution: 2.0,
            proportions: Proportions::single(Archetype::StairsUp),
            ..Default::default()
        };
        let mut settings = ArchetypeSettings::default();
        settings.stairs_upwards.step_width = 0.5;
        let world = compose_world(&spec, &settings).unwrap();
        let hm = rasterize(&world.mesh, &spec.heightmap_grid());
        let record = world.record(&spec);
        (world.mesh, hm, record)
    }

    #[test]
    fn test_heightmap_is_x_major() {
        let (mesh, hm, record) = small_world();
        let archive = TerrainArchive::new(&mesh, &hm, record);
        assert_eq!(archive.heightmap.len(), 16);
        assert_eq!(archive.heightmap[0].len(), 8);
        assert_eq!(archive.heightmap[5][3], hm.get(3, 5));
        assert_eq!(archive.vertices.len(), mesh.vertex_count());
    }

    #[test]
    fn test_gaps_survive_encoding() {
        let mesh = square_plane(DVec2::splat(0.5), 1.0, 0.2).unwrap();
        let grid = HeightmapGrid::new((0.0, 2.0), (0.0, 2.0), 2, 2);
        let hm = rasterize(&mesh, &grid);
        let (_, _, record) = small_world();
        let archive = TerrainArchive::new(&mesh, &hm, record);

        let decoded = TerrainArchive::decode(&archive.encode().unwrap()).unwrap();
        assert_eq!(decoded.heightmap[0][0], 0.2);
        assert!(decoded.heightmap[1][1].is_nan());
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.bin");
        let (mesh, hm, record) = small_world();
        let archive = TerrainArchive::new(&mesh, &hm, record);

        write_archive(&path, &archive).unwrap();
        let loaded = read_archive(&path).unwrap();
        assert_eq!(loaded.triangles, archive.triangles);
        assert_eq!(loaded.params, archive.params);
        assert_eq!(loaded.mesh().vertex_count(), mesh.vertex_count());
    }

    #[test]
    fn test_dense_heightmap_is_compact() {
        let mesh = square_plane(DVec2::splat(8.0), 16.0, 0.0).unwrap();
        let grid = HeightmapGrid::from_density((0.0, 16.0), (0.0, 16.0), 50.0);
        let hm = rasterize(&mesh, &grid);
        let (_, _, record) = small_world();
        let bytes = TerrainArchive::new(&mesh, &hm, record).encode().unwrap();
        // 800 × 800 samples would take 5 MB uncompressed.
        assert!(bytes.len() < 800 * 800, "{} bytes", bytes.len());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let (mesh, hm, record) = small_world();
        let mut archive = TerrainArchive::new(&mesh, &hm, record);
        archive.version = ARCHIVE_VERSION + 1;
        let result = TerrainArchive::decode(&archive.encode().unwrap());
        assert!(matches!(
            result,
            Err(ExportError::VersionMismatch { found, .. }) if found == ARCHIVE_VERSION + 1
        ));
    }

    #[test]
    fn test_corrupt_bytes_are_codec_error() {
        assert!(matches!(
            TerrainArchive::decode(&[1, 2, 3]),
            Err(ExportError::Codec(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_archive(&dir.path().join("absent.bin"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
