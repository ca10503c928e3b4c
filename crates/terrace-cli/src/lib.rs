//! Batch pipeline behind `terrace-gen`: compose the world, rasterize its
//! heightmap and write every output artifact. Preview mode renders each
//! archetype on its own instead.

use anyhow::Context;
use terrace_config::Config;
use terrace_export::{
    OutputPaths, PreviewPaths, TerrainArchive, render_heightmap, render_snapshot, timestamp,
    write_archive,
};
use terrace_terrain::{Archetype, HeightmapGrid, compose_world, rasterize, tile_rng};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub paths: OutputPaths,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// `(rows, cols)` of the heightmap.
    pub heightmap_shape: (usize, usize),
    pub gap_count: usize,
}

/// Run the pipeline with a validated config, stamping files with the current time.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let stamp = timestamp()?;
    run_with_timestamp(config, &stamp)
}

pub fn run_with_timestamp(config: &Config, stamp: &str) -> anyhow::Result<RunSummary> {
    let spec = config.world_spec();
    let paths = OutputPaths::new(&config.output.image_dir, &config.output.data_dir, stamp);
    paths.create_dirs().context("creating output directories")?;

    tracing::info!(
        rows = spec.num_rows,
        levels = spec.num_levels,
        tile_size = spec.tile_size,
        seed = spec.seed,
        "terrain generation"
    );
    let world = compose_world(&spec, &config.archetypes).context("composing world")?;

    if config.output.render_snapshot {
        tracing::info!("rendering snapshot");
        let snapshot = render_snapshot(
            &world.mesh,
            config.output.snapshot_width,
            config.output.snapshot_height,
        );
        snapshot
            .save(&paths.snapshot)
            .with_context(|| format!("writing {}", paths.snapshot.display()))?;
        snapshot
            .save(&paths.latest_snapshot)
            .with_context(|| format!("writing {}", paths.latest_snapshot.display()))?;
    }

    tracing::info!(resolution = spec.resolution, "heightmap generation");
    let grid = spec.heightmap_grid();
    let heightmap = rasterize(&world.mesh, &grid);
    render_heightmap(&heightmap)
        .save(&paths.heightmap_plot)
        .with_context(|| format!("writing {}", paths.heightmap_plot.display()))?;

    tracing::info!("saving mesh, heightmap and parameters");
    let archive = TerrainArchive::new(&world.mesh, &heightmap, world.record(&spec));
    write_archive(&paths.archive, &archive)
        .with_context(|| format!("writing {}", paths.archive.display()))?;
    std::fs::copy(&paths.archive, &paths.latest_archive)
        .with_context(|| format!("writing {}", paths.latest_archive.display()))?;

    Ok(RunSummary {
        vertex_count: world.mesh.vertex_count(),
        triangle_count: world.mesh.triangle_count(),
        heightmap_shape: heightmap.shape(),
        gap_count: heightmap.gap_count(),
        paths,
    })
}

/// Images written for one archetype in preview mode.
#[derive(Debug)]
pub struct Preview {
    pub archetype: Archetype,
    pub paths: PreviewPaths,
}

/// Render a full-difficulty tile of every archetype, numbered from 1 in
/// canonical order, into the image directory.
pub fn run_preview(config: &Config) -> anyhow::Result<Vec<Preview>> {
    let spec = config.world_spec();
    let (width, height) = (config.output.snapshot_width, config.output.snapshot_height);
    anyhow::ensure!(
        width > 0 && height > 0,
        "preview images need a non-zero size, got {width}x{height}"
    );
    let image_dir = &config.output.image_dir;
    std::fs::create_dir_all(image_dir)
        .with_context(|| format!("creating {}", image_dir.display()))?;

    let grid = HeightmapGrid::from_density(
        (0.0, spec.tile_size),
        (0.0, spec.tile_size),
        spec.resolution,
    );

    let mut previews = Vec::with_capacity(Archetype::ALL.len());
    for (index, archetype) in Archetype::ALL.into_iter().enumerate() {
        let mut rng = tile_rng(spec.seed, 0, index);
        let tile = config
            .archetypes
            .generate(archetype, spec.tile_size, 1.0, &mut rng)
            .with_context(|| format!("generating {archetype} preview"))?;
        let paths = PreviewPaths::new(image_dir, index + 1);
        tracing::info!(%archetype, render = %paths.render.display(), "rendering preview");

        render_snapshot(&tile.mesh, width, height)
            .save(&paths.render)
            .with_context(|| format!("writing {}", paths.render.display()))?;
        render_heightmap(&rasterize(&tile.mesh, &grid))
            .save(&paths.heightmap)
            .with_context(|| format!("writing {}", paths.heightmap.display()))?;

        previews.push(Preview { archetype, paths });
    }
    Ok(previews)
}
