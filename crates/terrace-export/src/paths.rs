//! Output file naming.

use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;

use crate::error::ExportError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");

/// Current local time as `YYYY-MM-DD_HH-MM-SS`.
///
/// Falls back to UTC when the local offset cannot be determined.
pub fn timestamp() -> Result<String, ExportError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, ExportError> {
    Ok(at.format(TIMESTAMP_FORMAT)?)
}

/// Every file one run writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub image_dir: PathBuf,
    pub data_dir: PathBuf,
    /// `terrains_<ts>.png`
    pub snapshot: PathBuf,
    /// `last_concatenated_terrains.png`, overwritten every run.
    pub latest_snapshot: PathBuf,
    /// `terrains_<ts>_heightmap.png`
    pub heightmap_plot: PathBuf,
    /// `terrain_<ts>.bin`
    pub archive: PathBuf,
    /// `terrain_latest.bin`, a copy of `archive` overwritten every run.
    pub latest_archive: PathBuf,
}

impl OutputPaths {
    pub fn new(image_dir: &Path, data_dir: &Path, timestamp: &str) -> Self {
        Self {
            image_dir: image_dir.to_path_buf(),
            data_dir: data_dir.to_path_buf(),
            snapshot: image_dir.join(format!("terrains_{timestamp}.png")),
            latest_snapshot: image_dir.join("last_concatenated_terrains.png"),
            heightmap_plot: image_dir.join(format!("terrains_{timestamp}_heightmap.png")),
            archive: data_dir.join(format!("terrain_{timestamp}.bin")),
            latest_archive: data_dir.join("terrain_latest.bin"),
        }
    }

    /// Create the image and data directories.
    pub fn create_dirs(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.image_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// Images written for one archetype in preview mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewPaths {
    /// `terrain<N>_3d.png`
    pub render: PathBuf,
    /// `terrain<N>_heightmap.png`
    pub heightmap: PathBuf,
}

impl PreviewPaths {
    /// Paths for the `number`-th previewed archetype, counting from 1.
    pub fn new(image_dir: &Path, number: usize) -> Self {
        Self {
            render: image_dir.join(format!("terrain{number}_3d.png")),
            heightmap: image_dir.join(format!("terrain{number}_heightmap.png")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_timestamp_format() {
        let at = datetime!(2024-03-07 09:05:02 UTC);
        assert_eq!(format_timestamp(at).unwrap(), "2024-03-07_09-05-02");
    }

    #[test]
    fn test_current_timestamp_shape() {
        let ts = timestamp().unwrap();
        assert_eq!(ts.len(), "YYYY-MM-DD_HH-MM-SS".len());
        assert_eq!(&ts[10..11], "_");
    }

    #[test]
    fn test_paths() {
        let paths = OutputPaths::new(Path::new("images"), Path::new("data"), "2024-03-07_09-05-02");
        assert_eq!(
            paths.snapshot,
            PathBuf::from("images/terrains_2024-03-07_09-05-02.png")
        );
        assert_eq!(
            paths.heightmap_plot,
            PathBuf::from("images/terrains_2024-03-07_09-05-02_heightmap.png")
        );
        assert_eq!(
            paths.latest_snapshot,
            PathBuf::from("images/last_concatenated_terrains.png")
        );
        assert_eq!(
            paths.archive,
            PathBuf::from("data/terrain_2024-03-07_09-05-02.bin")
        );
        assert_eq!(paths.latest_archive, PathBuf::from("data/terrain_latest.bin"));
    }

    #[test]
    fn test_preview_paths() {
        let paths = PreviewPaths::new(Path::new("images"), 3);
        assert_eq!(paths.render, PathBuf::from("images/terrain3_3d.png"));
        assert_eq!(paths.heightmap, PathBuf::from("images/terrain3_heightmap.png"));
    }

    #[test]
    fn test_create_dirs() {
        let root = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(
            &root.path().join("out/images"),
            &root.path().join("out/data"),
            "ts",
        );
        paths.create_dirs().unwrap();
        assert!(paths.image_dir.is_dir());
        assert!(paths.data_dir.is_dir());
    }
}
