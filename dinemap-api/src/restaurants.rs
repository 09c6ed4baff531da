//! Restaurant CRUD and the category catalog.

use crate::error::Result;
use crate::Dinemap;
use dinemap_core::{
    DocumentStore, Restaurant, RestaurantDoc, RestaurantId, RestaurantPatch,
};
use dinemap_spatial::SpatialIndex;
use std::collections::BTreeSet;

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    /// Insert a restaurant. Located records are reconciled into the
    /// spatial index as a follow-up to the write.
    pub async fn add_restaurant(&self, doc: RestaurantDoc) -> Result<RestaurantId> {
        let has_location = doc.location.is_some();
        let id = self.store.insert_restaurant(doc).await?;
        if has_location {
            self.sync_after_write(&id).await;
        }
        Ok(id)
    }

    /// Fetch one restaurant. Read path: a missing id is `None`.
    pub async fn get_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>> {
        Ok(self.store.get_restaurant(id).await?)
    }

    /// Every restaurant, in id order.
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        Ok(self.store.list_restaurants().await?)
    }

    /// All distinct categories across the catalog, sorted.
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let restaurants = self.store.list_restaurants().await?;
        let categories: BTreeSet<String> = restaurants
            .into_iter()
            .flat_map(|r| r.categories)
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Merge-style update used by enrichment and manual edits.
    ///
    /// Errors with `NotFound` on a missing id. When the patch touches
    /// the location - setting or clearing it - the spatial index is
    /// reconciled as a follow-up, so cleared coordinates evict the
    /// stale entry instead of leaving it answering map queries.
    pub async fn enrich_restaurant(&self, id: &RestaurantId, patch: RestaurantPatch) -> Result<()> {
        if patch.is_empty() {
            tracing::debug!(restaurant = %id, "empty enrichment patch, nothing to do");
            return Ok(());
        }
        let touches_location = patch.location.is_some();
        self.store.patch_restaurant(id, patch).await?;
        if touches_location {
            self.sync_after_write(id).await;
        }
        Ok(())
    }
}
