//! Document-store traits.
//!
//! These traits are the narrow contract over the hosted document
//! database. They are split per collection so a caller can depend on
//! exactly the surface it touches; [`DocumentStore`] is a marker for
//! "the whole database" and is blanket-implemented.
//!
//! Semantics all implementations must honor:
//!
//! - `get_*`/`find_*` return `Ok(None)` for missing records, never
//!   `NotFound`
//! - `patch_*`/`update_*` against a missing id return `NotFound`
//! - single-key writes are atomic and last-write-wins; no cross-key
//!   transaction is assumed
//! - `insert_*` assigns and returns an opaque, stable id

use crate::error::Result;
use crate::event::{Event, EventDoc, EventId, Menu, MenuDoc, MenuId};
use crate::restaurant::{MealType, Restaurant, RestaurantDoc, RestaurantId, RestaurantPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Restaurant collection access.
#[async_trait]
pub trait RestaurantStore: Debug + Send + Sync {
    /// Fetch one restaurant by id.
    async fn get_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>>;

    /// Insert a new restaurant, returning the assigned id.
    async fn insert_restaurant(&self, doc: RestaurantDoc) -> Result<RestaurantId>;

    /// Apply a partial update. Errors with `NotFound` on a missing id.
    async fn patch_restaurant(&self, id: &RestaurantId, patch: RestaurantPatch) -> Result<()>;

    /// All restaurants, ordered by id.
    ///
    /// Bulk resync and catalog listings use this; it is expected to be
    /// expensive and should not sit on a hot path.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>>;

    /// Look up a restaurant by its ingestion dedup key.
    async fn find_restaurant_by_key(&self, key: &str) -> Result<Option<Restaurant>>;

    /// Look up a restaurant by exact name (first match in id order).
    async fn find_restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>>;
}

/// Event collection access.
#[async_trait]
pub trait EventStore: Debug + Send + Sync {
    async fn get_event(&self, id: &EventId) -> Result<Option<Event>>;

    async fn insert_event(&self, doc: EventDoc) -> Result<EventId>;

    /// All events, ordered by start date.
    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn find_event_by_name(&self, name: &str) -> Result<Option<Event>>;

    /// Record when the ingestion pipeline last touched this event.
    /// Errors with `NotFound` on a missing id.
    async fn touch_event_sync_time(&self, id: &EventId, when: DateTime<Utc>) -> Result<()>;
}

/// Menu collection access.
#[async_trait]
pub trait MenuStore: Debug + Send + Sync {
    async fn insert_menu(&self, doc: MenuDoc) -> Result<MenuId>;

    /// Update price/url/sync-time of an existing menu.
    /// Errors with `NotFound` on a missing id.
    async fn update_menu(
        &self,
        id: &MenuId,
        price: f64,
        url: Option<String>,
        sync_time: DateTime<Utc>,
    ) -> Result<()>;

    /// The unique menu for a (restaurant, event, meal) triple, if any.
    async fn find_menu(
        &self,
        restaurant: &RestaurantId,
        event: &EventId,
        meal: MealType,
    ) -> Result<Option<Menu>>;

    async fn menus_for_event(&self, event: &EventId) -> Result<Vec<Menu>>;

    async fn menus_for_restaurant(&self, restaurant: &RestaurantId) -> Result<Vec<Menu>>;
}

/// Marker trait for a complete document store.
pub trait DocumentStore: RestaurantStore + EventStore + MenuStore {}

impl<T: RestaurantStore + EventStore + MenuStore> DocumentStore for T {}
