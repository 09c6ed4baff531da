//! Spatial point index for dinemap.
//!
//! Wraps the geospatial concern behind the [`SpatialIndex`] trait:
//! upsert/remove of restaurant location points (tagged with a category
//! payload and a rating sort key), paginated bounding-box queries, and
//! k-nearest-neighbor queries by great-circle distance.
//!
//! # Architecture
//!
//! ```text
//!   rectangle ──► cell covering ──► candidate scan ──► exact refine
//!                                                          │
//!                                                          ▼
//!                                         sort (sort key desc, key asc)
//!                                                          │
//!                                                          ▼
//!                                          cursor slice ──► page
//! ```
//!
//! The index holds derived data only: every entry is reconstructable
//! from its restaurant record, and the reconciler (dinemap-indexer)
//! rebuilds it at will. Ordering is stable - (sort key descending, key
//! ascending) - so a cursor identifies an exact resume position and
//! repeating a query over unchanged data returns an identical page.
//!
//! # Modules
//!
//! - [`provider`]: the [`SpatialIndex`] trait and result types
//! - [`grid`]: in-memory cell-grid reference implementation
//! - [`cursor`]: opaque pagination cursors
//! - [`config`]: grid sizing and paging defaults
//! - [`error`]: error types

pub mod config;
pub mod cursor;
mod distance;
pub mod error;
pub mod grid;
pub mod provider;

pub use config::{GridConfig, DEFAULT_QUERY_LIMIT};
pub use cursor::Cursor;
pub use error::{Result, SpatialError};
pub use grid::GridIndex;
pub use provider::{IndexEntry, NearestHit, RectHit, RectPage, SpatialIndex};
