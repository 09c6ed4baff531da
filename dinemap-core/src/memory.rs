//! In-memory document store.
//!
//! Reference implementation of the store traits for embedded mode and
//! tests. Interior mutability behind `Arc<RwLock<..>>` so the store can
//! be shared across tasks; every method takes `&self`.

use crate::error::{Error, Result};
use crate::event::{Event, EventDoc, EventId, Menu, MenuDoc, MenuId};
use crate::restaurant::{MealType, Restaurant, RestaurantDoc, RestaurantId, RestaurantPatch};
use crate::store::{EventStore, MenuStore, RestaurantStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// Memory-backed document store.
///
/// Cloning is cheap and clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

#[derive(Debug, Default)]
struct Collections {
    restaurants: FxHashMap<RestaurantId, Restaurant>,
    events: FxHashMap<EventId, Event>,
    menus: FxHashMap<MenuId, Menu>,
    next_id: u64,
}

impl Collections {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}:{:06}", self.next_id)
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn get_restaurant(&self, id: &RestaurantId) -> Result<Option<Restaurant>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        Ok(inner.restaurants.get(id).cloned())
    }

    async fn insert_restaurant(&self, doc: RestaurantDoc) -> Result<RestaurantId> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let id = RestaurantId::new(inner.next_id("restaurants"));
        let record = Restaurant::from_doc(id.clone(), doc);
        inner.restaurants.insert(id.clone(), record);
        Ok(id)
    }

    async fn patch_restaurant(&self, id: &RestaurantId, patch: RestaurantPatch) -> Result<()> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let record = inner
            .restaurants
            .get_mut(id)
            .ok_or_else(|| Error::not_found(format!("restaurant {id}")))?;
        patch.apply(record);
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut all: Vec<Restaurant> = inner.restaurants.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn find_restaurant_by_key(&self, key: &str) -> Result<Option<Restaurant>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut matches: Vec<&Restaurant> = inner
            .restaurants
            .values()
            .filter(|r| r.key.as_deref() == Some(key))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches.first().map(|r| (*r).clone()))
    }

    async fn find_restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut matches: Vec<&Restaurant> = inner
            .restaurants
            .values()
            .filter(|r| r.name == name)
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches.first().map(|r| (*r).clone()))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn get_event(&self, id: &EventId) -> Result<Option<Event>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        Ok(inner.events.get(id).cloned())
    }

    async fn insert_event(&self, doc: EventDoc) -> Result<EventId> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let id = EventId::new(inner.next_id("events"));
        let record = Event::from_doc(id.clone(), doc);
        inner.events.insert(id.clone(), record);
        Ok(id)
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut all: Vec<Event> = inner.events.values().cloned().collect();
        all.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_event_by_name(&self, name: &str) -> Result<Option<Event>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut matches: Vec<&Event> = inner.events.values().filter(|e| e.name == name).collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches.first().map(|e| (*e).clone()))
    }

    async fn touch_event_sync_time(&self, id: &EventId, when: DateTime<Utc>) -> Result<()> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let event = inner
            .events
            .get_mut(id)
            .ok_or_else(|| Error::not_found(format!("event {id}")))?;
        event.sync_time = Some(when);
        Ok(())
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn insert_menu(&self, doc: MenuDoc) -> Result<MenuId> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let id = MenuId::new(inner.next_id("menus"));
        let record = Menu::from_doc(id.clone(), doc);
        inner.menus.insert(id.clone(), record);
        Ok(id)
    }

    async fn update_menu(
        &self,
        id: &MenuId,
        price: f64,
        url: Option<String>,
        sync_time: DateTime<Utc>,
    ) -> Result<()> {
        let mut inner = self.inner.write().expect("RwLock poisoned");
        let menu = inner
            .menus
            .get_mut(id)
            .ok_or_else(|| Error::not_found(format!("menu {id}")))?;
        menu.price = price;
        if url.is_some() {
            menu.url = url;
        }
        menu.sync_time = sync_time;
        Ok(())
    }

    async fn find_menu(
        &self,
        restaurant: &RestaurantId,
        event: &EventId,
        meal: MealType,
    ) -> Result<Option<Menu>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        Ok(inner
            .menus
            .values()
            .find(|m| m.restaurant == *restaurant && m.event == *event && m.meal == meal)
            .cloned())
    }

    async fn menus_for_event(&self, event: &EventId) -> Result<Vec<Menu>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut menus: Vec<Menu> = inner
            .menus
            .values()
            .filter(|m| m.event == *event)
            .cloned()
            .collect();
        menus.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(menus)
    }

    async fn menus_for_restaurant(&self, restaurant: &RestaurantId) -> Result<Vec<Menu>> {
        let inner = self.inner.read().expect("RwLock poisoned");
        let mut menus: Vec<Menu> = inner
            .menus
            .values()
            .filter(|m| m.restaurant == *restaurant)
            .cloned()
            .collect();
        menus.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(menus)
    }
}
