//! Error surface of the dinemap API.
//!
//! Lower-crate errors are flattened into one caller-facing enum so that
//! the conditions a UI must distinguish - premium gating, bad viewport,
//! stale cursor, missing record - are top-level variants rather than
//! nested matches.

use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A mutation referenced an id that does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entitlement gate rejected a multi-dimension filter request.
    #[error("Premium access required to combine filters (feature '{feature}')")]
    PremiumRequired { feature: String },

    /// Viewport rectangle out of range or non-finite.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Point coordinates out of range or non-finite.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Pagination cursor failed to decode.
    #[error("Bad cursor: {0}")]
    BadCursor(String),

    /// A collaborator (spatial index, billing) failed.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Document store failure not covered by a variant above.
    #[error("Store error: {0}")]
    Store(dinemap_core::Error),
}

impl From<dinemap_core::Error> for ApiError {
    fn from(err: dinemap_core::Error) -> Self {
        match err {
            dinemap_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            dinemap_core::Error::InvalidBounds(msg) => ApiError::InvalidBounds(msg),
            dinemap_core::Error::InvalidCoordinates(msg) => ApiError::InvalidCoordinates(msg),
            dinemap_core::Error::Upstream(msg) => ApiError::Upstream(msg),
            other => ApiError::Store(other),
        }
    }
}

impl From<dinemap_spatial::SpatialError> for ApiError {
    fn from(err: dinemap_spatial::SpatialError) -> Self {
        use dinemap_spatial::SpatialError;
        match err {
            SpatialError::InvalidCoordinates(msg) => ApiError::InvalidCoordinates(msg),
            SpatialError::InvalidBounds(msg) => ApiError::InvalidBounds(msg),
            SpatialError::BadCursor(msg) => ApiError::BadCursor(msg),
            SpatialError::InvalidSortKey(key) => {
                ApiError::Upstream(format!("invalid sort key: {key}"))
            }
            SpatialError::Upstream(msg) => ApiError::Upstream(msg),
        }
    }
}

impl From<dinemap_query::QueryError> for ApiError {
    fn from(err: dinemap_query::QueryError) -> Self {
        use dinemap_query::QueryError;
        match err {
            QueryError::PremiumRequired { feature } => ApiError::PremiumRequired { feature },
            QueryError::Spatial(e) => e.into(),
            QueryError::Store(e) => e.into(),
        }
    }
}

impl From<dinemap_indexer::IndexerError> for ApiError {
    fn from(err: dinemap_indexer::IndexerError) -> Self {
        use dinemap_indexer::IndexerError;
        match err {
            IndexerError::NotFound(msg) => ApiError::NotFound(msg),
            IndexerError::Spatial(e) => e.into(),
            IndexerError::Store(e) => e.into(),
        }
    }
}
