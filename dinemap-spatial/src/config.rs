//! Spatial index configuration.

use serde::{Deserialize, Serialize};

/// Default page size for rectangle queries when the caller gives none.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Configuration for the in-memory grid index.
///
/// Controls cell granularity and paging defaults. Finer cells mean
/// tighter candidate sets per query but more cells to route over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cell edge length in degrees. Default: 0.25 (roughly 28 km of
    /// latitude, a city-sized bucket).
    pub cell_size_degrees: f64,

    /// Page size used when a query specifies no limit.
    pub default_query_limit: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_degrees: 0.25,
            default_query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl GridConfig {
    /// Set the cell edge length in degrees.
    pub fn with_cell_size(mut self, degrees: f64) -> Self {
        self.cell_size_degrees = degrees;
        self
    }

    /// Set the default page size.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_query_limit = limit;
        self
    }
}
