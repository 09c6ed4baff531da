//! Error types for query orchestration.

use thiserror::Error;

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Query orchestration errors.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The entitlement gate rejected a multi-dimension filter request.
    ///
    /// Surfaced as a distinct, user-actionable error: the caller can
    /// upgrade or drop filters, unlike a generic failure.
    #[error("Premium access required to combine filters (feature '{feature}')")]
    PremiumRequired { feature: String },

    /// Spatial index failure (bad bounds, bad cursor, upstream).
    #[error("Spatial index error: {0}")]
    Spatial(#[from] dinemap_spatial::SpatialError),

    /// Document store failure.
    #[error("Document store error: {0}")]
    Store(#[from] dinemap_core::Error),
}
