//! The dinemap API facade.
//!
//! [`Dinemap`] composes the document store, the spatial index, and the
//! billing/auth collaborators into the operations the UI layer calls:
//!
//! - bounded map queries with filtering and premium gating ([`geo`])
//! - restaurant CRUD and the category catalog ([`restaurants`])
//! - restaurant-week events and menus ([`events`])
//! - scraped-data ingestion with keyed upserts ([`ingest`])
//! - spatial index synchronization ([`sync`])
//!
//! The facade is generic over the store and index so hosted adapters
//! drop in behind the same traits; [`DinemapBuilder::memory`] wires the
//! in-memory reference implementations for embedded use and tests:
//!
//! ```
//! use dinemap_api::DinemapBuilder;
//!
//! let dinemap = DinemapBuilder::memory().build_memory();
//! ```
//!
//! Collaborator defaults are conservative: anonymous auth and
//! deny-all entitlements, so multi-dimension filtering stays gated
//! until a real billing client is attached.

pub mod error;
pub mod events;
pub mod geo;
pub mod ingest;
pub mod restaurants;
pub mod sync;

pub use error::{ApiError, Result};
pub use events::EventSummary;
pub use geo::{NearRestaurant, DEFAULT_NEAREST_RESULTS};
pub use ingest::{IngestReport, ScrapedMenu, ScrapedRestaurant};

// Re-export the vocabulary callers need to drive the facade.
pub use dinemap_core::{
    DocumentStore, Event, EventDoc, EventId, EventStore, GeoPoint, GeoRect, MealType, MemoryStore,
    Menu, MenuId, MenuStore, Restaurant, RestaurantDoc, RestaurantId, RestaurantPatch,
    RestaurantStore, UserId,
};
pub use dinemap_indexer::{SyncOutcome, SyncReport, SyncWorker};
pub use dinemap_query::{
    AuthProvider, Entitlement, EntitlementClient, PriceBound, QueryPage, RestaurantFilter,
    StaticAuth, StaticEntitlements, ADVANCED_FILTERS_FEATURE,
};
pub use dinemap_spatial::{
    Cursor, GridConfig, GridIndex, IndexEntry, SpatialIndex, DEFAULT_QUERY_LIMIT,
};

use dinemap_indexer::SyncWorkerHandle;
use dinemap_query::FeatureGate;
use std::sync::Arc;

/// Memory-backed dinemap instance.
pub type MemoryDinemap = Dinemap<MemoryStore, GridIndex>;

/// The dinemap facade.
pub struct Dinemap<S, G> {
    store: Arc<S>,
    index: Arc<G>,
    entitlements: Arc<dyn EntitlementClient>,
    auth: Arc<dyn AuthProvider>,
    gate: FeatureGate,
    sync_worker: Option<SyncWorkerHandle>,
}

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    /// Assemble a facade from its parts.
    pub fn new(
        store: Arc<S>,
        index: Arc<G>,
        entitlements: Arc<dyn EntitlementClient>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            store,
            index,
            entitlements,
            auth,
            gate: FeatureGate::advanced_filters(),
            sync_worker: None,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn index(&self) -> &Arc<G> {
        &self.index
    }

    /// Start a background sync worker and route write-path
    /// reconciliation through it.
    ///
    /// Without a worker, writes reconcile the index inline before
    /// returning; with one, reconciliation is deferred fire-and-forget
    /// and a restaurant may be briefly absent from map results after
    /// creation. The returned [`SyncWorker`] drains once the facade
    /// (and any cloned handles) are dropped.
    pub fn start_sync_worker(&mut self) -> SyncWorker
    where
        S: 'static,
        G: 'static,
    {
        let (worker, handle) = SyncWorker::spawn(self.store.clone(), self.index.clone());
        self.sync_worker = Some(handle);
        worker
    }
}

/// Builder for [`Dinemap`] instances.
pub struct DinemapBuilder {
    grid_config: GridConfig,
    entitlements: Arc<dyn EntitlementClient>,
    auth: Arc<dyn AuthProvider>,
}

impl DinemapBuilder {
    /// Start a memory-backed configuration.
    pub fn memory() -> Self {
        Self {
            grid_config: GridConfig::default(),
            entitlements: Arc::new(StaticEntitlements::deny_all()),
            auth: Arc::new(StaticAuth::anonymous()),
        }
    }

    pub fn with_grid_config(mut self, config: GridConfig) -> Self {
        self.grid_config = config;
        self
    }

    pub fn with_entitlements(mut self, client: Arc<dyn EntitlementClient>) -> Self {
        self.entitlements = client;
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = auth;
        self
    }

    /// Build over the in-memory store and grid index.
    pub fn build_memory(self) -> MemoryDinemap {
        Dinemap::new(
            Arc::new(MemoryStore::new()),
            Arc::new(GridIndex::new(self.grid_config)),
            self.entitlements,
            self.auth,
        )
    }
}
