//! Error types for dinemap-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Read paths report missing records as `Ok(None)`, not `NotFound`;
/// `NotFound` is reserved for mutation paths that reference an id that
/// does not resolve.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Latitude/longitude outside the valid range or non-finite
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Bounding rectangle outside the valid range or non-finite
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Unknown meal type string
    #[error("Unknown meal type: {0}")]
    UnknownMeal(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// External collaborator (billing, auth) call failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an invalid coordinates error
    pub fn invalid_coordinates(msg: impl Into<String>) -> Self {
        Error::InvalidCoordinates(msg.into())
    }

    /// Create an invalid bounds error
    pub fn invalid_bounds(msg: impl Into<String>) -> Self {
        Error::InvalidBounds(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Error::Upstream(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
