//! `terrace-gen`: generate a world of terrain tiles, its heightmap and the
//! archive describing both.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use terrace_cli::{run, run_preview};
use terrace_config::{CliArgs, Config};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir)
        .with_context(|| format!("loading config from {}", config_dir.display()))?;
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    terrace_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    config.validate().context("configuration rejected")?;

    if args.preview {
        let previews = run_preview(&config)?;
        tracing::info!(count = previews.len(), "previews written");
        return Ok(());
    }

    let summary = run(&config)?;
    tracing::info!(
        archive = %summary.paths.archive.display(),
        gaps = summary.gap_count,
        "done"
    );
    Ok(())
}
