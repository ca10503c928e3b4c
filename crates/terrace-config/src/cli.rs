//! Command-line argument parsing for the terrain generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrain generator command-line arguments.
///
/// CLI values override settings loaded from `terrace.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "terrace-gen",
    about = "Generate a grid of synthetic terrain tiles and its heightmap"
)]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of terrain rows.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of difficulty levels per row.
    #[arg(long)]
    pub levels: Option<usize>,

    /// Tile side length in meters.
    #[arg(long)]
    pub terrain_size: Option<f64>,

    /// Heightmap samples per meter.
    #[arg(long)]
    pub resolution: Option<f64>,

    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output root; images and data go to `<output>/images` and `<output>/data`.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the shaded snapshot of the world mesh.
    #[arg(long)]
    pub no_snapshot: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Render one full-difficulty tile of every archetype instead of a world.
    #[arg(long)]
    pub preview: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(rows) = args.rows {
            self.world.num_rows = rows;
        }
        if let Some(levels) = args.levels {
            self.world.num_levels = levels;
        }
        if let Some(size) = args.terrain_size {
            self.world.terrain_size = size;
        }
        if let Some(resolution) = args.resolution {
            self.world.resolution = resolution;
        }
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ref root) = args.output {
            self.output.image_dir = root.join("images");
            self.output.data_dir = root.join("data");
        }
        if args.no_snapshot {
            self.output.render_snapshot = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
