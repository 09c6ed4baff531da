//! Bounded and proximity map queries.
//!
//! Both bounds-query entry points keep the entitlement gate in the call
//! path. The plain variant serves the free tier: it fails closed at
//! more than one filter dimension without consulting billing. The
//! `_with_auth` variant resolves the caller's identity and asks the
//! entitlement collaborator, admitting premium users past the gate.

use crate::error::Result;
use crate::Dinemap;
use dinemap_core::{DocumentStore, GeoPoint, GeoRect, Restaurant};
use dinemap_query::{run_bounded_query, QueryPage, RestaurantFilter};
use dinemap_spatial::{Cursor, SpatialIndex};

/// Default result count for nearest-neighbor queries.
pub const DEFAULT_NEAREST_RESULTS: usize = 10;

/// A nearby restaurant with its great-circle distance.
#[derive(Debug, Clone)]
pub struct NearRestaurant {
    pub restaurant: Restaurant,
    pub distance_meters: f64,
}

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    /// Query restaurants in a map viewport (free tier).
    ///
    /// Usable with at most one active filter dimension; beyond that
    /// the gate rejects with `PremiumRequired` before any work is done.
    pub async fn query_restaurants_in_bounds(
        &self,
        rect: &GeoRect,
        limit: Option<usize>,
        cursor: Option<&Cursor>,
        filter: &RestaurantFilter,
    ) -> Result<QueryPage> {
        self.gate.deny_if_gated(filter)?;
        let page = run_bounded_query(
            self.index.as_ref(),
            self.store.as_ref(),
            rect,
            limit,
            cursor,
            filter,
        )
        .await?;
        Ok(page)
    }

    /// Query restaurants in a map viewport with entitlement validation.
    ///
    /// Multi-dimension filters require an explicit allow from the
    /// billing collaborator for the current user; anything else is
    /// `PremiumRequired`.
    pub async fn query_restaurants_in_bounds_with_auth(
        &self,
        rect: &GeoRect,
        limit: Option<usize>,
        cursor: Option<&Cursor>,
        filter: &RestaurantFilter,
    ) -> Result<QueryPage> {
        let user = self.auth.current_user_id().await;
        self.gate
            .authorize(self.entitlements.as_ref(), user.as_ref(), filter)
            .await?;
        let page = run_bounded_query(
            self.index.as_ref(),
            self.store.as_ref(),
            rect,
            limit,
            cursor,
            filter,
        )
        .await?;
        Ok(page)
    }

    /// The nearest restaurants to a point, nearest first.
    ///
    /// Records indexed but deleted since are dropped silently, as in
    /// the bounded query.
    pub async fn query_nearest_restaurants(
        &self,
        point: &GeoPoint,
        max_results: Option<usize>,
        max_distance_meters: Option<f64>,
    ) -> Result<Vec<NearRestaurant>> {
        let hits = self
            .index
            .query_nearest(
                point,
                max_results.unwrap_or(DEFAULT_NEAREST_RESULTS),
                max_distance_meters,
            )
            .await?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            if let Some(restaurant) = self.store.get_restaurant(&hit.key).await? {
                results.push(NearRestaurant {
                    restaurant,
                    distance_meters: hit.distance_meters,
                });
            }
        }
        Ok(results)
    }
}
