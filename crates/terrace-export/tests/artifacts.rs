use std::path::Path;

use terrace_export::{
    OutputPaths, TerrainArchive, read_archive, render_heightmap, render_snapshot, write_archive,
};
use terrace_terrain::{Archetype, ArchetypeSettings, Proportions, WorldSpec, compose_world, rasterize};

#[test]
fn full_artifact_set_is_written() {
    let root = tempfile::tempdir().unwrap();
    let paths = OutputPaths::new(
        &root.path().join("images"),
        &root.path().join("data"),
        "2024-01-01_00-00-00",
    );
    paths.create_dirs().unwrap();

    let spec = WorldSpec {
        num_rows: 2,
        num_levels: 2,
        resolution: 4.0,
        proportions: Proportions::single(Archetype::Checkerboard),
        ..Default::default()
    };
    let world = compose_world(&spec, &ArchetypeSettings::default()).unwrap();
    let heightmap = rasterize(&world.mesh, &spec.heightmap_grid());

    let snapshot = render_snapshot(&world.mesh, 320, 180);
    snapshot.save(&paths.snapshot).unwrap();
    snapshot.save(&paths.latest_snapshot).unwrap();
    render_heightmap(&heightmap).save(&paths.heightmap_plot).unwrap();

    let archive = TerrainArchive::new(&world.mesh, &heightmap, world.record(&spec));
    write_archive(&paths.archive, &archive).unwrap();
    std::fs::copy(&paths.archive, &paths.latest_archive).unwrap();

    for path in [
        &paths.snapshot,
        &paths.latest_snapshot,
        &paths.heightmap_plot,
        &paths.archive,
        &paths.latest_archive,
    ] {
        assert!(Path::new(path).is_file(), "{} missing", path.display());
    }

    let reopened = image::open(&paths.snapshot).unwrap();
    assert_eq!((reopened.width(), reopened.height()), (320, 180));

    let loaded = read_archive(&paths.latest_archive).unwrap();
    assert_eq!(loaded.heightmap.len(), 64);
    assert_eq!(loaded.heightmap[0].len(), 64);
    assert_eq!(loaded.params.num_rows, 2);
    assert_eq!(loaded.vertices.len(), world.mesh.vertex_count());
    assert_eq!(loaded.heightmap[3][5], heightmap.get(5, 3));
}
