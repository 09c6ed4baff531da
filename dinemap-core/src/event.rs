//! Restaurant-week events and their menus.
//!
//! A menu ties one restaurant to one event for one meal service.
//! Uniqueness invariant: at most one menu per (restaurant, event, meal)
//! triple; ingestion upserts must update in place rather than duplicate.

use crate::geo::GeoPoint;
use crate::restaurant::{MealType, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable event identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque menu identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(String);

impl MenuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A restaurant-week event.
///
/// Menu and restaurant counts are computed at read time from the
/// associated menus, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: GeoPoint,
    pub website_url: Option<String>,
    /// Last time the ingestion pipeline touched this event.
    pub sync_time: Option<DateTime<Utc>>,
}

/// Insert payload for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDoc {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: GeoPoint,
    pub website_url: Option<String>,
}

impl Event {
    pub fn from_doc(id: EventId, doc: EventDoc) -> Self {
        Self {
            id,
            name: doc.name,
            start_date: doc.start_date,
            end_date: doc.end_date,
            location: doc.location,
            website_url: doc.website_url,
            sync_time: None,
        }
    }

    /// An event is active while its end date has not passed.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date >= now
    }
}

/// One restaurant's menu for one meal service of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub restaurant: RestaurantId,
    pub event: EventId,
    pub meal: MealType,
    pub price: f64,
    pub url: Option<String>,
    pub sync_time: DateTime<Utc>,
}

/// Insert payload for a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDoc {
    pub restaurant: RestaurantId,
    pub event: EventId,
    pub meal: MealType,
    pub price: f64,
    pub url: Option<String>,
    pub sync_time: DateTime<Utc>,
}

impl Menu {
    pub fn from_doc(id: MenuId, doc: MenuDoc) -> Self {
        Self {
            id,
            restaurant: doc.restaurant,
            event: doc.event,
            meal: doc.meal,
            price: doc.price,
            url: doc.url,
            sync_time: doc.sync_time,
        }
    }
}
