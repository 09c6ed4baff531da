//! Shared test harness for dinemap-api integration tests.

// Helpers are used by *some* integration test crates but not others;
// keep them centralized here and silence dead_code warnings in crates
// that don't reference every helper.
#![allow(dead_code)]

use dinemap_api::{
    DinemapBuilder, GeoPoint, GeoRect, MemoryDinemap, RestaurantDoc, RestaurantId, StaticAuth,
    StaticEntitlements,
};
use std::sync::Arc;

/// Install a compact tracing subscriber for test debugging.
///
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .try_init();
}

/// Memory-backed facade with the conservative defaults: anonymous auth,
/// deny-all entitlements.
pub fn memory_dinemap() -> MemoryDinemap {
    init_tracing();
    DinemapBuilder::memory().build_memory()
}

/// Memory-backed facade for an authenticated premium user.
pub fn premium_dinemap() -> MemoryDinemap {
    init_tracing();
    DinemapBuilder::memory()
        .with_entitlements(Arc::new(StaticEntitlements::allow_all()))
        .with_auth(Arc::new(StaticAuth::user("user-42")))
        .build_memory()
}

/// The San Francisco viewport used across these tests.
pub fn sf_rect() -> GeoRect {
    GeoRect::new(38.0, 37.0, -122.0, -123.0)
}

pub struct Fixture {
    pub name: &'static str,
    pub rating: f64,
    pub lat: f64,
    pub lng: f64,
    pub categories: &'static [&'static str],
    pub brunch: Option<f64>,
    pub lunch: Option<f64>,
    pub dinner: Option<f64>,
}

/// Bay Area fixture set. The French Laundry sits north of [`sf_rect`],
/// which the containment tests rely on.
pub const BAY_AREA: &[Fixture] = &[
    Fixture {
        name: "Zuni Café",
        rating: 4.5,
        lat: 37.7789,
        lng: -122.4221,
        categories: &["American", "Mediterranean", "Italian"],
        brunch: Some(45.0),
        lunch: Some(35.0),
        dinner: Some(55.0),
    },
    Fixture {
        name: "State Bird Provisions",
        rating: 4.6,
        lat: 37.7849,
        lng: -122.4294,
        categories: &["American", "Contemporary", "Dim Sum"],
        brunch: None,
        lunch: None,
        dinner: Some(75.0),
    },
    Fixture {
        name: "Tartine Bakery",
        rating: 4.4,
        lat: 37.7611,
        lng: -122.4209,
        categories: &["Bakery", "Café", "Breakfast"],
        brunch: Some(20.0),
        lunch: Some(25.0),
        dinner: None,
    },
    Fixture {
        name: "Gary Danko",
        rating: 4.7,
        lat: 37.8057,
        lng: -122.4189,
        categories: &["French", "American", "Fine Dining"],
        brunch: None,
        lunch: None,
        dinner: Some(150.0),
    },
    Fixture {
        name: "La Taqueria",
        rating: 4.3,
        lat: 37.7488,
        lng: -122.4189,
        categories: &["Mexican", "Tacos", "Burritos"],
        brunch: None,
        lunch: Some(15.0),
        dinner: Some(15.0),
    },
    Fixture {
        name: "The French Laundry",
        rating: 4.8,
        lat: 38.4036,
        lng: -122.3644,
        categories: &["French", "Fine Dining", "Contemporary"],
        brunch: None,
        lunch: Some(350.0),
        dinner: Some(350.0),
    },
];

pub fn doc_for(fixture: &Fixture) -> RestaurantDoc {
    RestaurantDoc {
        key: None,
        name: fixture.name.to_string(),
        rating: Some(fixture.rating),
        location: Some(GeoPoint::new(fixture.lat, fixture.lng)),
        address: None,
        website_url: None,
        yelp_url: None,
        open_table_url: None,
        categories: fixture.categories.iter().map(|c| c.to_string()).collect(),
        brunch_price: fixture.brunch,
        lunch_price: fixture.lunch,
        dinner_price: fixture.dinner,
    }
}

/// Seed the Bay Area fixtures through the facade (inline index sync).
pub async fn seed_bay_area(dinemap: &MemoryDinemap) -> Vec<RestaurantId> {
    let mut ids = Vec::new();
    for fixture in BAY_AREA {
        let id = dinemap
            .add_restaurant(doc_for(fixture))
            .await
            .expect("seed restaurant");
        ids.push(id);
    }
    ids
}
