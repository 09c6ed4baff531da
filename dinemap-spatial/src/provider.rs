//! Spatial index provider trait.
//!
//! Abstracts over embedded (in-process) and hosted spatial index
//! backends. Query orchestration depends on this trait so it works
//! identically with either.
//!
//! # Contract
//!
//! - `insert` upserts by key: an existing entry is replaced entirely.
//!   Idempotent. Coordinates and sort key are validated; calling with
//!   an unlocated restaurant is a caller error (the reconciler only
//!   inserts records that have a location).
//! - `remove` reports found/not-found and never errors on a missing
//!   key.
//! - `query_rect` returns entries inside the rectangle in the stable
//!   (sort key desc, key asc) order, paginated by opaque cursor. The
//!   cursor belongs to the index: a page may be short after attribute
//!   filtering upstream, and continuation still uses this cursor.
//! - `query_nearest` returns the k nearest entries by haversine
//!   distance, nearest first, optionally capped by a maximum distance
//!   in meters.

use crate::cursor::Cursor;
use crate::error::Result;
use async_trait::async_trait;
use dinemap_core::{GeoPoint, GeoRect, RestaurantId};
use serde::{Deserialize, Serialize};

/// One indexed restaurant location.
///
/// Derived data: always reconstructable from the restaurant record.
/// The category payload rides along for future index-side filtering;
/// today attribute filtering happens on fetched records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: RestaurantId,
    pub point: GeoPoint,
    pub categories: Vec<String>,
    /// Rating-derived ordering key; higher sorts first.
    pub sort_key: f64,
}

/// A rectangle-query hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RectHit {
    pub key: RestaurantId,
    pub point: GeoPoint,
}

/// One page of rectangle-query results.
#[derive(Debug, Clone, Default)]
pub struct RectPage {
    pub results: Vec<RectHit>,
    /// Continuation cursor when more entries remain past this page.
    pub next_cursor: Option<Cursor>,
}

/// A nearest-neighbor hit.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestHit {
    pub key: RestaurantId,
    pub point: GeoPoint,
    pub distance_meters: f64,
}

/// Spatial index over restaurant location points.
#[async_trait]
pub trait SpatialIndex: Send + Sync {
    /// Upsert an entry by key, replacing any existing entry entirely.
    async fn insert(&self, entry: IndexEntry) -> Result<()>;

    /// Remove an entry. Returns whether the key was present.
    async fn remove(&self, key: &RestaurantId) -> Result<bool>;

    /// Page through entries inside an axis-aligned rectangle.
    ///
    /// `limit` defaults to the index's configured page size. Rectangles
    /// crossing the antimeridian match nothing (documented limitation;
    /// callers split the viewport).
    async fn query_rect(
        &self,
        rect: &GeoRect,
        limit: Option<usize>,
        cursor: Option<&Cursor>,
    ) -> Result<RectPage>;

    /// K-nearest entries to a point, nearest first.
    async fn query_nearest(
        &self,
        point: &GeoPoint,
        max_results: usize,
        max_distance_meters: Option<f64>,
    ) -> Result<Vec<NearestHit>>;
}
