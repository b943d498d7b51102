//! Error types for Snowmap

use thiserror::Error;

/// Main error type for Snowmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid bounds: south={south}, west={west}, north={north}, east={east}")]
    InvalidBounds {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },

    #[error("Degenerate image: {0}")]
    DegenerateImage(String),

    #[error("Raster has no spatial reference and no fallback extent is available")]
    NoReference,

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Reprojection failed: {0}")]
    Reprojection(String),

    #[error("Missing attribute column: tried {0:?}")]
    MissingColumn(Vec<String>),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Helper for non-finite numeric parameters
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "must be finite".to_string(),
        }
    }
}

/// Result type alias for Snowmap operations
pub type Result<T> = std::result::Result<T, Error>;
