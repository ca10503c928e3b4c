//! Output artifacts: shaded snapshot, heightmap plot, mesh archive, the
//! timestamped paths they are written to and per-archetype preview images.

mod archive;
mod colormap;
mod error;
mod paths;
mod plot;
mod snapshot;

pub use archive::{ARCHIVE_VERSION, TerrainArchive, read_archive, write_archive};
pub use error::ExportError;
pub use paths::{OutputPaths, PreviewPaths, timestamp};
pub use plot::render_heightmap;
pub use snapshot::render_snapshot;
