//! Configuration for the terrain generator.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and are validated before any generation starts.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, OutputConfig, WorldConfig};
pub use error::ConfigError;
