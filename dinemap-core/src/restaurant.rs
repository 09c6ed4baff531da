//! Restaurant records, meal types, and id newtypes.
//!
//! Meal availability is derived from price presence: a restaurant
//! "offers" a meal iff it has a price for it. Earlier schema revisions
//! carried redundant has-brunch/has-lunch/has-dinner booleans alongside
//! the prices and let them drift apart; price presence is the single
//! source of truth here.

use crate::error::Error;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, stable restaurant identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque user identifier from the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three meal services a restaurant-week menu can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Brunch,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Brunch, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Brunch => "brunch",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = Error;

    /// Case-insensitive parse; scraped data arrives as "Dinner", "LUNCH", etc.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brunch" => Ok(MealType::Brunch),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(Error::UnknownMeal(other.to_string())),
        }
    }
}

/// A restaurant record as stored in the document store.
///
/// `location` is the canonical coordinate representation: a restaurant
/// either has a complete point or none at all, and it is spatially
/// indexed iff `location` is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    /// Dedup key assigned by the ingestion pipeline (content hash).
    pub key: Option<String>,
    pub name: String,
    pub rating: Option<f64>,
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub yelp_url: Option<String>,
    pub open_table_url: Option<String>,
    pub categories: Vec<String>,
    pub brunch_price: Option<f64>,
    pub lunch_price: Option<f64>,
    pub dinner_price: Option<f64>,
}

impl Restaurant {
    pub fn from_doc(id: RestaurantId, doc: RestaurantDoc) -> Self {
        Self {
            id,
            key: doc.key,
            name: doc.name,
            rating: doc.rating,
            location: doc.location,
            address: doc.address,
            website_url: doc.website_url,
            yelp_url: doc.yelp_url,
            open_table_url: doc.open_table_url,
            categories: doc.categories,
            brunch_price: doc.brunch_price,
            lunch_price: doc.lunch_price,
            dinner_price: doc.dinner_price,
        }
    }

    /// Price for a meal, if the restaurant offers it.
    pub fn price_for(&self, meal: MealType) -> Option<f64> {
        match meal {
            MealType::Brunch => self.brunch_price,
            MealType::Lunch => self.lunch_price,
            MealType::Dinner => self.dinner_price,
        }
    }

    /// Derived availability: a meal is offered iff it has a price.
    pub fn offers(&self, meal: MealType) -> bool {
        self.price_for(meal).is_some()
    }

    /// Sort key used by the spatial index (rating, defaulting to 0).
    pub fn sort_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Insert payload for a restaurant: everything but the store-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDoc {
    pub key: Option<String>,
    pub name: String,
    pub rating: Option<f64>,
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub yelp_url: Option<String>,
    pub open_table_url: Option<String>,
    pub categories: Vec<String>,
    pub brunch_price: Option<f64>,
    pub lunch_price: Option<f64>,
    pub dinner_price: Option<f64>,
}

impl RestaurantDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a restaurant.
///
/// `Some(value)` sets a field, `None` leaves it unchanged. The location
/// field is doubly optional so that coordinates can be cleared
/// (`Some(None)`) as well as set (`Some(Some(point))`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub location: Option<Option<GeoPoint>>,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub yelp_url: Option<String>,
    pub open_table_url: Option<String>,
    pub categories: Option<Vec<String>>,
    pub brunch_price: Option<f64>,
    pub lunch_price: Option<f64>,
    pub dinner_price: Option<f64>,
}

impl RestaurantPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rating.is_none()
            && self.location.is_none()
            && self.address.is_none()
            && self.website_url.is_none()
            && self.yelp_url.is_none()
            && self.open_table_url.is_none()
            && self.categories.is_none()
            && self.brunch_price.is_none()
            && self.lunch_price.is_none()
            && self.dinner_price.is_none()
    }

    /// Apply this patch to a record in place.
    pub fn apply(&self, restaurant: &mut Restaurant) {
        if let Some(name) = &self.name {
            restaurant.name = name.clone();
        }
        if let Some(rating) = self.rating {
            restaurant.rating = Some(rating);
        }
        if let Some(location) = self.location {
            restaurant.location = location;
        }
        if let Some(address) = &self.address {
            restaurant.address = Some(address.clone());
        }
        if let Some(url) = &self.website_url {
            restaurant.website_url = Some(url.clone());
        }
        if let Some(url) = &self.yelp_url {
            restaurant.yelp_url = Some(url.clone());
        }
        if let Some(url) = &self.open_table_url {
            restaurant.open_table_url = Some(url.clone());
        }
        if let Some(categories) = &self.categories {
            restaurant.categories = categories.clone();
        }
        if let Some(price) = self.brunch_price {
            restaurant.brunch_price = Some(price);
        }
        if let Some(price) = self.lunch_price {
            restaurant.lunch_price = Some(price);
        }
        if let Some(price) = self.dinner_price {
            restaurant.dinner_price = Some(price);
        }
    }
}
