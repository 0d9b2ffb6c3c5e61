//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing or exporting frames.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid surface dimensions (zero width or height).
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Encoding a frame failed.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing a frame to disk failed.
    #[error("failed to write frame to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
