//! Error module for the Rusty Raster library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum RasterError {
    /// Error for malformed spike matrices, e.g., rows of different lengths.
    InvalidShape(String),
    /// Error for a color string which is not of the form `#rrggbb`.
    InvalidColor(String),
    /// Error for invalid parameters, e.g., an image of zero width.
    InvalidParameter(String),
    /// Error raised by the drawing backend.
    RenderError(String),
    /// Error for I/O operations.
    IOError(String),
    /// Error while reading or writing JSON.
    SerializationError(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RasterError::InvalidShape(e) => write!(f, "Invalid shape: {}", e),
            RasterError::InvalidColor(e) => write!(f, "Invalid color: {}", e),
            RasterError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            RasterError::RenderError(e) => write!(f, "Rendering error: {}", e),
            RasterError::IOError(e) => write!(f, "I/O error: {}", e),
            RasterError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl Error for RasterError {}

impl From<std::io::Error> for RasterError {
    fn from(e: std::io::Error) -> Self {
        RasterError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for RasterError {
    fn from(e: serde_json::Error) -> Self {
        RasterError::SerializationError(e.to_string())
    }
}
