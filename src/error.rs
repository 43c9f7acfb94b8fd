//! Error types for the undeck library.

use std::io;
use thiserror::Error;

/// Result type alias for undeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing an output stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A slide carries content the renderer cannot process.
    ///
    /// Fatal for the affected dialect only; identifies the slide index and
    /// the element type so the caller can locate the problem in the source
    /// presentation.
    #[error("Invalid slide {slide}: {element}: {reason}")]
    InvalidSlide {
        /// Zero-based slide index.
        slide: usize,
        /// Element type name (e.g. "Table", "Image").
        element: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Error serializing the presentation model.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
