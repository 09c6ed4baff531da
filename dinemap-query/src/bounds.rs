//! Bounded query orchestration.
//!
//! The central read path: spatial candidates for the viewport, full
//! records fetched per candidate, attribute filters applied in-band,
//! the spatial index's cursor passed through untouched.
//!
//! Pagination is driven by the index's page boundaries, not by the
//! post-filter result count: a page may legitimately come back short -
//! or empty - while more data remains behind the cursor. Re-querying
//! inside a page to backfill filtered-out slots would make page
//! boundaries depend on filter selectivity and break cursor stability.

use crate::error::Result;
use crate::filter::RestaurantFilter;
use dinemap_core::{GeoRect, Restaurant, RestaurantStore};
use dinemap_spatial::{Cursor, SpatialIndex};

/// One page of bounded-query results.
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    pub results: Vec<Restaurant>,
    /// The spatial index's continuation cursor, passed through as-is.
    pub next_cursor: Option<Cursor>,
}

/// Execute a bounded, filtered restaurant query.
///
/// Records indexed but since deleted from the store are a tolerated
/// race: they are dropped silently, never an error.
#[tracing::instrument(skip_all, fields(limit = ?limit, dimensions = filter.dimension_count()))]
pub async fn run_bounded_query<G, S>(
    index: &G,
    store: &S,
    rect: &GeoRect,
    limit: Option<usize>,
    cursor: Option<&Cursor>,
    filter: &RestaurantFilter,
) -> Result<QueryPage>
where
    G: SpatialIndex + ?Sized,
    S: RestaurantStore + ?Sized,
{
    let page = index.query_rect(rect, limit, cursor).await?;

    // No candidates: skip the fetch/filter entirely, keep the cursor
    if page.results.is_empty() {
        return Ok(QueryPage {
            results: Vec::new(),
            next_cursor: page.next_cursor,
        });
    }

    let candidates = page.results.len();
    let mut results: Vec<Restaurant> = Vec::with_capacity(candidates);
    for hit in &page.results {
        let Some(restaurant) = store.get_restaurant(&hit.key).await? else {
            // Deleted since indexing
            continue;
        };
        if filter.matches(&restaurant) {
            results.push(restaurant);
        }
    }

    tracing::debug!(
        candidates,
        matched = results.len(),
        has_more = page.next_cursor.is_some(),
        "bounded query"
    );

    Ok(QueryPage {
        results,
        next_cursor: page.next_cursor,
    })
}
