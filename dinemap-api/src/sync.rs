//! Spatial index synchronization operations.

use crate::error::Result;
use crate::Dinemap;
use dinemap_core::{DocumentStore, RestaurantId};
use dinemap_indexer::{sync_all, sync_one, SyncOutcome, SyncReport};
use dinemap_spatial::SpatialIndex;

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    /// Reconcile one restaurant into the spatial index.
    ///
    /// Errors with `NotFound` when the id does not resolve.
    pub async fn sync_restaurant_to_index(&self, id: &RestaurantId) -> Result<SyncOutcome> {
        Ok(sync_one(self.store.as_ref(), self.index.as_ref(), id).await?)
    }

    /// Bulk resync of every restaurant. Idempotent; safe to call
    /// redundantly - how often to run it is caller policy, there is no
    /// already-synced flag here.
    pub async fn sync_all_restaurants_to_index(&self) -> Result<SyncReport> {
        Ok(sync_all(self.store.as_ref(), self.index.as_ref()).await?)
    }

    /// Reconcile after a coordinate-affecting write.
    ///
    /// Deferred through the worker when one is attached, inline
    /// otherwise. Never fails the triggering write: reconciliation
    /// problems are logged and the record simply stays unindexed until
    /// the next sync.
    pub(crate) async fn sync_after_write(&self, id: &RestaurantId) {
        match &self.sync_worker {
            Some(handle) => handle.trigger(id.clone()),
            None => {
                if let Err(err) =
                    sync_one(self.store.as_ref(), self.index.as_ref(), id).await
                {
                    tracing::warn!(restaurant = %id, error = %err, "post-write index sync failed");
                }
            }
        }
    }
}
