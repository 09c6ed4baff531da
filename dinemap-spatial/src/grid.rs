//! In-memory cell-grid index.
//!
//! Reference implementation of [`SpatialIndex`]. Points are bucketed
//! into a coarse lat/lon grid; a rectangle query routes to the cells it
//! overlaps, refines candidates by exact containment, sorts them into
//! the stable index order, and slices the page at the cursor position.
//!
//! Hosted deployments would replace this with an adapter over the
//! platform's geospatial add-on; the trait contract is identical.

use crate::config::GridConfig;
use crate::cursor::{self, Cursor};
use crate::distance::haversine_distance;
use crate::error::{Result, SpatialError};
use crate::provider::{IndexEntry, NearestHit, RectHit, RectPage, SpatialIndex};
use async_trait::async_trait;
use dinemap_core::{GeoPoint, GeoRect, RestaurantId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::sync::RwLock;

/// Grid cell coordinate (scaled, floored lat/lon).
type Cell = (i64, i64);

#[derive(Debug, Default)]
struct GridState {
    entries: FxHashMap<RestaurantId, IndexEntry>,
    cells: FxHashMap<Cell, FxHashSet<RestaurantId>>,
}

/// Memory-backed grid index.
#[derive(Debug)]
pub struct GridIndex {
    config: GridConfig,
    state: RwLock<GridState>,
}

impl Default for GridIndex {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridIndex {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            state: RwLock::new(GridState::default()),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.state.read().expect("RwLock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell_of(&self, point: &GeoPoint) -> Cell {
        let size = self.config.cell_size_degrees;
        (
            (point.latitude / size).floor() as i64,
            (point.longitude / size).floor() as i64,
        )
    }

    /// Cells overlapping a rectangle. Empty when west > east, which is
    /// how antimeridian-crossing rectangles fall out as matching
    /// nothing.
    fn covering(&self, rect: &GeoRect) -> Vec<Cell> {
        let size = self.config.cell_size_degrees;
        let lat_min = (rect.south / size).floor() as i64;
        let lat_max = (rect.north / size).floor() as i64;
        let lng_min = (rect.west / size).floor() as i64;
        let lng_max = (rect.east / size).floor() as i64;

        let mut cells = Vec::new();
        for lat in lat_min..=lat_max {
            for lng in lng_min..=lng_max {
                cells.push((lat, lng));
            }
        }
        cells
    }
}

/// Stable index order: sort key descending, then key ascending.
fn cmp_index_order(a_sort: f64, a_key: &str, b_sort: f64, b_key: &str) -> Ordering {
    b_sort
        .total_cmp(&a_sort)
        .then_with(|| a_key.cmp(b_key))
}

#[async_trait]
impl SpatialIndex for GridIndex {
    async fn insert(&self, entry: IndexEntry) -> Result<()> {
        entry.point.validate()?;
        if !entry.sort_key.is_finite() {
            return Err(SpatialError::InvalidSortKey(entry.sort_key));
        }

        let cell = self.cell_of(&entry.point);
        let mut state = self.state.write().expect("RwLock poisoned");

        // Upsert: a moved entry must leave its old cell
        let old_cell = state
            .entries
            .get(&entry.key)
            .map(|previous| self.cell_of(&previous.point));
        if let Some(old_cell) = old_cell {
            if old_cell != cell {
                if let Some(members) = state.cells.get_mut(&old_cell) {
                    members.remove(&entry.key);
                }
            }
        }

        state
            .cells
            .entry(cell)
            .or_default()
            .insert(entry.key.clone());
        state.entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn remove(&self, key: &RestaurantId) -> Result<bool> {
        let mut state = self.state.write().expect("RwLock poisoned");
        match state.entries.remove(key) {
            Some(entry) => {
                let cell = self.cell_of(&entry.point);
                if let Some(members) = state.cells.get_mut(&cell) {
                    members.remove(key);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn query_rect(
        &self,
        rect: &GeoRect,
        limit: Option<usize>,
        cursor: Option<&Cursor>,
    ) -> Result<RectPage> {
        rect.validate()?;
        let limit = limit.unwrap_or(self.config.default_query_limit);
        if limit == 0 {
            return Ok(RectPage::default());
        }
        let after = cursor.map(cursor::decode).transpose()?;

        let state = self.state.read().expect("RwLock poisoned");

        // Route to overlapping cells, refine by exact containment
        let mut candidates: Vec<&IndexEntry> = Vec::new();
        for cell in self.covering(rect) {
            if let Some(members) = state.cells.get(&cell) {
                for key in members {
                    if let Some(entry) = state.entries.get(key) {
                        if rect.contains(&entry.point) {
                            candidates.push(entry);
                        }
                    }
                }
            }
        }

        candidates.sort_by(|a, b| {
            cmp_index_order(a.sort_key, a.key.as_str(), b.sort_key, b.key.as_str())
        });

        // Resume strictly after the cursor position
        let start = match &after {
            Some(position) => candidates.partition_point(|entry| {
                cmp_index_order(
                    entry.sort_key,
                    entry.key.as_str(),
                    position.sort_key,
                    &position.key,
                ) != Ordering::Greater
            }),
            None => 0,
        };

        let end = (start + limit).min(candidates.len());
        let results: Vec<RectHit> = candidates[start..end]
            .iter()
            .map(|entry| RectHit {
                key: entry.key.clone(),
                point: entry.point,
            })
            .collect();

        let next_cursor = if end < candidates.len() {
            let last = candidates[end - 1];
            Some(cursor::encode(last.sort_key, &last.key))
        } else {
            None
        };

        tracing::debug!(
            candidates = candidates.len(),
            page = results.len(),
            has_more = next_cursor.is_some(),
            "rectangle query"
        );

        Ok(RectPage {
            results,
            next_cursor,
        })
    }

    async fn query_nearest(
        &self,
        point: &GeoPoint,
        max_results: usize,
        max_distance_meters: Option<f64>,
    ) -> Result<Vec<NearestHit>> {
        point.validate()?;
        let state = self.state.read().expect("RwLock poisoned");

        let mut hits: Vec<NearestHit> = state
            .entries
            .values()
            .filter_map(|entry| {
                let distance = haversine_distance(
                    point.latitude,
                    point.longitude,
                    entry.point.latitude,
                    entry.point.longitude,
                );
                match max_distance_meters {
                    Some(cap) if distance > cap => None,
                    _ => Some(NearestHit {
                        key: entry.key.clone(),
                        point: entry.point,
                        distance_meters: distance,
                    }),
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.key.cmp(&b.key))
        });
        hits.truncate(max_results);
        Ok(hits)
    }
}
