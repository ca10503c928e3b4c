use glam::{DVec2, DVec3};
use terrace_mesh::PlanarBounds;
use terrace_terrain::{
    Archetype, ArchetypeSettings, Proportions, WorldSpec, compose_world, difficulty_levels,
    rasterize, tile_rng,
};

fn checkerboard_spec() -> WorldSpec {
    WorldSpec {
        tile_size: 8.0,
        num_rows: 1,
        num_levels: 2,
        resolution: 10.0,
        proportions: Proportions::single(Archetype::Checkerboard),
        ..Default::default()
    }
}

#[test]
fn checkerboard_world_end_to_end() {
    let spec = checkerboard_spec();
    let world = compose_world(&spec, &ArchetypeSettings::default()).unwrap();

    assert_eq!(world.tile_bounds.len(), 2);
    assert_eq!(world.tile_bounds[0].min, DVec2::ZERO);
    assert_eq!(world.tile_bounds[1].min, DVec2::new(8.0, 0.0));
    assert_eq!(world.rows.len(), 1);
    assert_eq!(world.rows[0].archetype, Archetype::Checkerboard);

    let grid = spec.heightmap_grid();
    let hm = rasterize(&world.mesh, &grid);
    assert_eq!(hm.shape(), (80, 160));
    assert_eq!(hm.gap_count(), 0);

    // Points in the flat border ring of both tiles.
    for (row, col) in [(2, 2), (2, 82), (77, 40), (40, 157), (40, 78)] {
        assert_eq!(hm.get(row, col), 0.0, "border sample ({row}, {col})");
    }

    // Sample (0.7, 0.7) sits on the first raised cell of tile 0.
    let top = hm.get(7, 7);
    assert!((0.07..=0.11).contains(&top), "block top {top}");
}

#[test]
fn heightmap_reads_block_top_elevation() {
    let mut settings = ArchetypeSettings::default();
    settings.checkerboard.noise = 0.0;
    let spec = checkerboard_spec();
    let world = compose_world(&spec, &settings).unwrap();
    let hm = rasterize(&world.mesh, &spec.heightmap_grid());

    // Raised cells of tile 1: (i + j) even, cell size 0.5 starting at x = 8.5.
    assert!((hm.get(7, 87) - 0.09).abs() < 1e-9);
    assert!((hm.get(12, 92) - 0.09).abs() < 1e-9);
    // Neighbouring flat cell.
    assert!(hm.get(7, 92).abs() < 1e-9);
}

#[test]
fn world_vertex_count_is_sum_of_tiles() {
    let spec = WorldSpec {
        num_rows: 3,
        num_levels: 3,
        seed: 5,
        proportions: Proportions(
            [(Archetype::StairsUp, 1.0), (Archetype::RandomBlocks, 1.0), (Archetype::SquareCentric, 1.0)]
                .into_iter()
                .collect(),
        ),
        ..Default::default()
    };
    let settings = ArchetypeSettings::default();
    let world = compose_world(&spec, &settings).unwrap();

    let mut expected = 0;
    for (row, info) in world.rows.iter().enumerate() {
        for (level, difficulty) in difficulty_levels(spec.num_levels).into_iter().enumerate() {
            let tile = settings
                .generate(
                    info.archetype,
                    spec.tile_size,
                    difficulty,
                    &mut tile_rng(spec.seed, row, level),
                )
                .unwrap();
            expected += tile.mesh.vertex_count();
        }
    }
    assert_eq!(world.mesh.vertex_count(), expected);
    assert_eq!(
        world.rows.iter().map(|r| r.archetype).collect::<Vec<_>>(),
        vec![Archetype::StairsUp, Archetype::RandomBlocks, Archetype::SquareCentric]
    );
}

#[test]
fn placed_tile_meshes_only_share_edges() {
    let spec = WorldSpec {
        num_rows: 4,
        num_levels: 3,
        seed: 23,
        proportions: Proportions(
            [
                (Archetype::StairsDown, 1.0),
                (Archetype::RandomBlocks, 1.0),
                (Archetype::Slope, 1.0),
                (Archetype::TiltedSquares, 1.0),
            ]
            .into_iter()
            .collect(),
        ),
        ..Default::default()
    };
    let settings = ArchetypeSettings::default();
    let world = compose_world(&spec, &settings).unwrap();

    let mut placed = Vec::new();
    for (row, info) in world.rows.iter().enumerate() {
        for (level, difficulty) in difficulty_levels(spec.num_levels).into_iter().enumerate() {
            let mut tile = settings
                .generate(
                    info.archetype,
                    spec.tile_size,
                    difficulty,
                    &mut tile_rng(spec.seed, row, level),
                )
                .unwrap();
            tile.mesh.translate(DVec3::new(
                level as f64 * spec.tile_size,
                row as f64 * spec.tile_size,
                0.0,
            ));
            let bounds = tile.mesh.planar_bounds().unwrap();
            let expected = PlanarBounds::square(
                DVec2::new(level as f64, row as f64) * spec.tile_size,
                spec.tile_size,
            );
            assert!(
                bounds.approx_eq(&expected, 1e-9),
                "tile ({row}, {level}) covers {bounds:?}"
            );
            placed.push(bounds);
        }
    }

    assert_eq!(placed.len(), world.tile_bounds.len());
    for (a, b) in placed.iter().zip(&world.tile_bounds) {
        assert!(a.approx_eq(b, 1e-9));
    }
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!a.intersects_interior(b, 1e-9), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn same_seed_same_world() {
    let spec = WorldSpec {
        num_rows: 2,
        num_levels: 2,
        seed: 17,
        proportions: Proportions::single(Archetype::RandomBlocks),
        ..Default::default()
    };
    let settings = ArchetypeSettings::default();
    let a = compose_world(&spec, &settings).unwrap();
    let b = compose_world(&spec, &settings).unwrap();
    assert_eq!(a.mesh, b.mesh);

    let other = compose_world(&WorldSpec { seed: 18, ..spec }, &settings).unwrap();
    assert_ne!(a.mesh, other.mesh);
}
