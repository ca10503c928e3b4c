use rand::Rng;
use terrace_mesh::square_plane;

use super::{check_inputs, tile_center};
use crate::archetype::{Archetype, Tile, TileGenerator, TileInfo, TileParams};
use crate::error::TerrainError;

/// A single ground plane; difficulty has no effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatGenerator;

impl TileGenerator for FlatGenerator {
    fn archetype(&self) -> Archetype {
        Archetype::Flat
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        tile_size: f64,
        difficulty: f64,
        _rng: &mut R,
    ) -> Result<Tile, TerrainError> {
        check_inputs(tile_size, difficulty)?;
        Ok(Tile {
            mesh: square_plane(tile_center(tile_size), tile_size, 0.0)?,
            info: TileInfo {
                archetype: Archetype::Flat,
                difficulty,
                tile_size,
                params: TileParams::Flat,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::*;

    #[test]
    fn test_flat_tile() {
        let tile = FlatGenerator.generate(8.0, 0.7, &mut rng()).unwrap();
        assert_eq!(tile.mesh.triangle_count(), 2);
        assert_footprint(&tile.mesh, 8.0);
        assert_eq!(tile.mesh.z_range(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_flat_rejects_bad_difficulty() {
        assert!(matches!(
            FlatGenerator.generate(8.0, 1.5, &mut rng()),
            Err(TerrainError::DifficultyOutOfRange(_))
        ));
        assert!(FlatGenerator.generate(8.0, f64::NAN, &mut rng()).is_err());
        assert!(matches!(
            FlatGenerator.generate(0.0, 0.5, &mut rng()),
            Err(TerrainError::InvalidTileSize(_))
        ));
    }
}
