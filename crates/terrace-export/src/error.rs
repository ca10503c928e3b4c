//! Export error types.

/// Errors that can occur while writing output artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Creating a directory or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Encoding, compressing or decoding the archive failed.
    #[error("archive codec error: {0}")]
    Codec(String),

    /// The archive was written by an incompatible version.
    #[error("archive version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    /// The local clock could not be formatted into a timestamp.
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}
