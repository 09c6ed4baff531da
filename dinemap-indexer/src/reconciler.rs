//! Reconciliation of the spatial index against the document store.

use crate::error::{IndexerError, Result};
use dinemap_core::{Restaurant, RestaurantId, RestaurantStore};
use dinemap_spatial::{IndexEntry, SpatialIndex};

/// What a single reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The restaurant has coordinates and was upserted into the index.
    Indexed,
    /// The restaurant has no coordinates; any stale entry was evicted.
    Evicted,
}

/// Result of a bulk resync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Restaurants upserted into the index.
    pub synced: usize,
    /// Restaurants without coordinates (evicted or never indexed).
    pub skipped: usize,
}

fn entry_for(restaurant: &Restaurant) -> Option<IndexEntry> {
    restaurant.location.map(|point| IndexEntry {
        key: restaurant.id.clone(),
        point,
        categories: restaurant.categories.clone(),
        sort_key: restaurant.sort_rating(),
    })
}

/// Reconcile one restaurant into the spatial index.
///
/// Errors with `NotFound` when the id does not resolve: sync is only
/// ever triggered for records that exist, so a dangling id is a bug.
pub async fn sync_one<S, G>(store: &S, index: &G, id: &RestaurantId) -> Result<SyncOutcome>
where
    S: RestaurantStore + ?Sized,
    G: SpatialIndex + ?Sized,
{
    let restaurant = store
        .get_restaurant(id)
        .await?
        .ok_or_else(|| IndexerError::NotFound(id.to_string()))?;

    match entry_for(&restaurant) {
        Some(entry) => {
            index.insert(entry).await?;
            tracing::debug!(restaurant = %id, "indexed");
            Ok(SyncOutcome::Indexed)
        }
        None => {
            // Coordinates cleared since the last sync: evict rather
            // than leave a stale point answering map queries
            let was_indexed = index.remove(id).await?;
            if was_indexed {
                tracing::debug!(restaurant = %id, "evicted unlocated restaurant");
            }
            Ok(SyncOutcome::Evicted)
        }
    }
}

/// Bulk resync: reconcile every restaurant in the store.
///
/// Idempotent - upserts all the way down - so re-running after a crash
/// or calling it redundantly converges on the same index state.
pub async fn sync_all<S, G>(store: &S, index: &G) -> Result<SyncReport>
where
    S: RestaurantStore + ?Sized,
    G: SpatialIndex + ?Sized,
{
    let restaurants = store.list_restaurants().await?;
    let total = restaurants.len();
    let mut report = SyncReport::default();

    for restaurant in restaurants {
        match entry_for(&restaurant) {
            Some(entry) => {
                index.insert(entry).await?;
                report.synced += 1;
            }
            None => {
                index.remove(&restaurant.id).await?;
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        total,
        synced = report.synced,
        skipped = report.skipped,
        "bulk resync complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinemap_core::{GeoPoint, MemoryStore, RestaurantDoc, RestaurantPatch};
    use dinemap_spatial::GridIndex;

    async fn seed_located(store: &MemoryStore, name: &str, lat: f64, lng: f64) -> RestaurantId {
        let mut doc = RestaurantDoc::new(name);
        doc.location = Some(GeoPoint::new(lat, lng));
        doc.rating = Some(4.2);
        store.insert_restaurant(doc).await.unwrap()
    }

    #[tokio::test]
    async fn sync_one_indexes_located_restaurant() {
        let store = MemoryStore::new();
        let index = GridIndex::default();
        let id = seed_located(&store, "Zuni Café", 37.7789, -122.4221).await;

        let outcome = sync_one(&store, &index, &id).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Indexed);
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn sync_one_evicts_when_coordinates_cleared() {
        let store = MemoryStore::new();
        let index = GridIndex::default();
        let id = seed_located(&store, "Zuni Café", 37.7789, -122.4221).await;
        sync_one(&store, &index, &id).await.unwrap();
        assert_eq!(index.len(), 1);

        store
            .patch_restaurant(
                &id,
                RestaurantPatch {
                    location: Some(None),
                    ..RestaurantPatch::default()
                },
            )
            .await
            .unwrap();

        let outcome = sync_one(&store, &index, &id).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Evicted);
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn sync_one_missing_id_is_an_error() {
        let store = MemoryStore::new();
        let index = GridIndex::default();
        let err = sync_one(&store, &index, &RestaurantId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, IndexerError::NotFound(_)));
    }

    #[tokio::test]
    async fn sync_all_is_idempotent() {
        let store = MemoryStore::new();
        let index = GridIndex::default();
        seed_located(&store, "Zuni Café", 37.7789, -122.4221).await;
        seed_located(&store, "Nopa", 37.7749, -122.4376).await;
        store
            .insert_restaurant(RestaurantDoc::new("No Coordinates Deli"))
            .await
            .unwrap();

        let first = sync_all(&store, &index).await.unwrap();
        assert_eq!(first, SyncReport { synced: 2, skipped: 1 });
        assert_eq!(index.len(), 2);

        let second = sync_all(&store, &index).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(index.len(), 2);
    }
}
