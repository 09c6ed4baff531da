//! Error types for index reconciliation.

use thiserror::Error;

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Reconciliation errors.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// The referenced restaurant does not exist.
    ///
    /// Sync is a mutation path, so a dangling id is an error here even
    /// though read paths report missing records as `None`.
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    /// Spatial index failure.
    #[error("Spatial index error: {0}")]
    Spatial(#[from] dinemap_spatial::SpatialError),

    /// Document store failure.
    #[error("Document store error: {0}")]
    Store(#[from] dinemap_core::Error),
}
