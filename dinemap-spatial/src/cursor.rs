//! Opaque pagination cursors.
//!
//! A cursor records the last-returned position in the index's stable
//! (sort key desc, key asc) order, so the next page resumes strictly
//! after it. The encoding - base64 over a small JSON payload - is an
//! implementation detail; callers treat cursors as opaque strings.

use crate::error::{Result, SpatialError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use dinemap_core::RestaurantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque continuation token for rectangle queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn from_string(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resume position in index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Position {
    pub sort_key: f64,
    pub key: String,
}

pub(crate) fn encode(sort_key: f64, key: &RestaurantId) -> Cursor {
    let position = Position {
        sort_key,
        key: key.as_str().to_string(),
    };
    // Serializing a two-field struct of (f64, String) cannot fail
    let json = serde_json::to_vec(&position).expect("cursor payload serializes");
    Cursor(URL_SAFE_NO_PAD.encode(json))
}

pub(crate) fn decode(cursor: &Cursor) -> Result<Position> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor.as_str())
        .map_err(|e| SpatialError::BadCursor(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SpatialError::BadCursor(e.to_string()))
}
