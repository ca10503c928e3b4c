//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use terrace_terrain::{Archetype, ArchetypeSettings, Proportions, WorldSpec};

use crate::error::ConfigError;

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "terrace.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World layout and heightmap settings.
    pub world: WorldConfig,
    /// Relative weight of each archetype (archetype name -> weight).
    pub proportions: Proportions,
    /// Per-archetype generator parameters.
    pub archetypes: ArchetypeSettings,
    /// Output locations and snapshot settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of one tile in meters.
    pub terrain_size: f64,
    /// Border size in meters. Recorded with the output only.
    pub border_size: f64,
    /// Number of difficulty levels (tiles per row).
    pub num_levels: usize,
    /// Number of rows, one archetype each.
    pub num_rows: usize,
    /// Heightmap samples per meter.
    pub resolution: f64,
    /// Seed for every per-tile random stream.
    pub seed: u64,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the snapshot and heightmap images.
    pub image_dir: PathBuf,
    /// Directory for the mesh/heightmap archive.
    pub data_dir: PathBuf,
    pub snapshot_width: u32,
    pub snapshot_height: u32,
    /// Render the shaded snapshot of the world mesh.
    pub render_snapshot: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            terrain_size: 8.0,
            border_size: 10.0,
            num_levels: 4,
            num_rows: 4,
            resolution: 100.0,
            seed: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            data_dir: PathBuf::from("data"),
            snapshot_width: 1920,
            snapshot_height: 1080,
            render_snapshot: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Validate ---

impl Config {
    /// Platform config directory for the generator, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("terrace"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `terrace.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject settings that cannot produce a world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(world.terrain_size.is_finite() && world.terrain_size > 0.0) {
            return Err(invalid(format!(
                "terrain_size must be positive, got {}",
                world.terrain_size
            )));
        }
        if world.num_levels == 0 || world.num_rows == 0 {
            return Err(invalid(format!(
                "num_levels and num_rows must be at least 1, got {} and {}",
                world.num_levels, world.num_rows
            )));
        }
        if !(world.resolution.is_finite() && world.resolution > 0.0) {
            return Err(invalid(format!(
                "resolution must be positive, got {}",
                world.resolution
            )));
        }

        for (archetype, &weight) in &self.proportions.0 {
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid(format!(
                    "weight for {archetype} must be non-negative, got {weight}"
                )));
            }
        }
        if !Archetype::ALL
            .iter()
            .any(|&a| self.proportions.weight(a) > 0.0)
        {
            return Err(invalid(
                "at least one terrain archetype must have a positive weight".to_string(),
            ));
        }

        let output = &self.output;
        if output.render_snapshot && (output.snapshot_width == 0 || output.snapshot_height == 0) {
            return Err(invalid(format!(
                "snapshot size must be non-zero, got {}x{}",
                output.snapshot_width, output.snapshot_height
            )));
        }
        Ok(())
    }

    /// The world description handed to the composer.
    pub fn world_spec(&self) -> WorldSpec {
        WorldSpec {
            tile_size: self.world.terrain_size,
            border_size: self.world.border_size,
            num_levels: self.world.num_levels,
            num_rows: self.world.num_rows,
            resolution: self.world.resolution,
            seed: self.world.seed,
            proportions: self.proportions.clone(),
        }
    }
}

fn invalid(reason: String) -> ConfigError {
    log::error!("{reason}");
    ConfigError::Invalid(reason)
}
