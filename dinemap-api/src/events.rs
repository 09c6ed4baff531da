//! Restaurant-week events and menus.
//!
//! Event counts are denormalized at read time from the menu
//! association, never stored: the menu collection is the source of
//! truth for which restaurants participate in an event.

use crate::error::Result;
use crate::Dinemap;
use chrono::{DateTime, Utc};
use dinemap_core::{
    DocumentStore, Event, EventDoc, EventId, Menu, Restaurant, RestaurantId,
};
use dinemap_spatial::SpatialIndex;
use std::collections::BTreeSet;

/// An event with its read-time participation counts.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub event: Event,
    pub menu_count: usize,
    pub restaurant_count: usize,
}

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    pub async fn add_event(&self, doc: EventDoc) -> Result<EventId> {
        Ok(self.store.insert_event(doc).await?)
    }

    /// Current and upcoming events with counts, sorted by start date.
    pub async fn list_active_events(&self) -> Result<Vec<EventSummary>> {
        self.list_active_events_at(Utc::now()).await
    }

    /// As [`list_active_events`](Self::list_active_events), against an
    /// explicit clock.
    pub async fn list_active_events_at(&self, now: DateTime<Utc>) -> Result<Vec<EventSummary>> {
        let events = self.store.list_events().await?;
        let mut summaries = Vec::new();
        for event in events {
            if event.is_active_at(now) {
                summaries.push(self.summarize(event).await?);
            }
        }
        Ok(summaries)
    }

    /// One event by name, with counts. Read path: missing is `None`.
    pub async fn get_event_by_name(&self, name: &str) -> Result<Option<EventSummary>> {
        match self.store.find_event_by_name(name).await? {
            Some(event) => Ok(Some(self.summarize(event).await?)),
            None => Ok(None),
        }
    }

    /// The restaurants participating in a named event (via its menus).
    ///
    /// An unknown event name yields an empty list, not an error.
    pub async fn restaurants_for_event(&self, event_name: &str) -> Result<Vec<Restaurant>> {
        let Some(event) = self.store.find_event_by_name(event_name).await? else {
            return Ok(Vec::new());
        };

        let menus = self.store.menus_for_event(&event.id).await?;
        let ids: BTreeSet<RestaurantId> = menus.into_iter().map(|m| m.restaurant).collect();

        let mut restaurants = Vec::with_capacity(ids.len());
        for id in ids {
            // Menus pointing at deleted restaurants are dropped
            if let Some(restaurant) = self.store.get_restaurant(&id).await? {
                restaurants.push(restaurant);
            }
        }
        Ok(restaurants)
    }

    pub async fn menus_for_event(&self, event: &EventId) -> Result<Vec<Menu>> {
        Ok(self.store.menus_for_event(event).await?)
    }

    pub async fn menus_for_restaurant(&self, restaurant: &RestaurantId) -> Result<Vec<Menu>> {
        Ok(self.store.menus_for_restaurant(restaurant).await?)
    }

    async fn summarize(&self, event: Event) -> Result<EventSummary> {
        let menus = self.store.menus_for_event(&event.id).await?;
        let restaurants: BTreeSet<&RestaurantId> = menus.iter().map(|m| &m.restaurant).collect();
        Ok(EventSummary {
            menu_count: menus.len(),
            restaurant_count: restaurants.len(),
            event,
        })
    }
}
