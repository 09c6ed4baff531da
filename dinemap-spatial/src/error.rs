//! Error types for the spatial index.

use thiserror::Error;

/// Spatial index errors.
#[derive(Error, Debug)]
pub enum SpatialError {
    /// Point coordinates out of range or non-finite.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Query rectangle out of range or non-finite.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Sort key must be finite for the index order to be total.
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(f64),

    /// Pagination cursor failed to decode.
    #[error("Bad cursor: {0}")]
    BadCursor(String),

    /// The backing index engine failed.
    #[error("Upstream index error: {0}")]
    Upstream(String),
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;

impl From<dinemap_core::Error> for SpatialError {
    fn from(err: dinemap_core::Error) -> Self {
        match err {
            dinemap_core::Error::InvalidCoordinates(msg) => SpatialError::InvalidCoordinates(msg),
            dinemap_core::Error::InvalidBounds(msg) => SpatialError::InvalidBounds(msg),
            other => SpatialError::Upstream(other.to_string()),
        }
    }
}
