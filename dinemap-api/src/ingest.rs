//! Scraped-data ingestion.
//!
//! The crawl pipeline hands over batches of scraped restaurants, each
//! carrying a deterministic dedup key (a content hash computed
//! upstream) and the menus it found for one event. Ingestion is a
//! keyed upsert: known keys update in place, new keys insert. Menus
//! honor the (restaurant, event, meal) uniqueness invariant, and meal
//! prices found on menus propagate onto the restaurant record so the
//! price filters see them.
//!
//! Bad rows - a missing name, an unknown meal, a menu without a price -
//! are skipped with a warning; one junk row must not fail the batch.

use crate::error::{ApiError, Result};
use crate::Dinemap;
use chrono::Utc;
use dinemap_core::{
    DocumentStore, EventId, GeoPoint, MealType, MenuDoc, RestaurantDoc, RestaurantPatch,
};
use dinemap_spatial::SpatialIndex;
use serde::{Deserialize, Serialize};

/// One scraped menu row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedMenu {
    /// Meal name as scraped ("Dinner", "lunch", ...).
    pub meal: String,
    pub price: Option<f64>,
    pub url: Option<String>,
}

/// One scraped restaurant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedRestaurant {
    /// Deterministic dedup key from the crawl pipeline.
    pub key: String,
    pub name: String,
    pub rating: Option<f64>,
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub yelp_url: Option<String>,
    pub open_table_url: Option<String>,
    pub categories: Vec<String>,
    pub menus: Vec<ScrapedMenu>,
}

impl ScrapedRestaurant {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            rating: None,
            location: None,
            address: None,
            website_url: None,
            yelp_url: None,
            open_table_url: None,
            categories: Vec::new(),
            menus: Vec::new(),
        }
    }
}

/// What a batch ingest did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub restaurants_processed: usize,
    pub menus_processed: usize,
}

impl<S, G> Dinemap<S, G>
where
    S: DocumentStore,
    G: SpatialIndex,
{
    /// Ingest a batch of scraped restaurants and menus for an event.
    ///
    /// Errors with `NotFound` when the event id does not resolve; rows
    /// within the batch fail soft.
    pub async fn ingest_scraped_restaurants(
        &self,
        event_id: &EventId,
        batch: Vec<ScrapedRestaurant>,
    ) -> Result<IngestReport> {
        // Mutation path referencing the event: a dangling id is an error
        if self.store.get_event(event_id).await?.is_none() {
            return Err(ApiError::NotFound(format!("event {event_id}")));
        }

        let sync_time = Utc::now();
        let mut report = IngestReport::default();

        for scraped in batch {
            if scraped.name.is_empty() {
                tracing::warn!(key = %scraped.key, "skipping scraped restaurant with no name");
                continue;
            }

            let coordinates_touched = scraped.location.is_some();
            let existing = self.store.find_restaurant_by_key(&scraped.key).await?;
            let restaurant_id = match existing {
                Some(existing) => {
                    // Known key: merge, preferring freshly scraped values
                    let patch = RestaurantPatch {
                        rating: scraped.rating,
                        location: scraped.location.map(Some),
                        address: scraped.address,
                        website_url: scraped.website_url,
                        yelp_url: scraped.yelp_url,
                        open_table_url: scraped.open_table_url,
                        categories: if scraped.categories.is_empty() {
                            None
                        } else {
                            Some(scraped.categories)
                        },
                        ..RestaurantPatch::default()
                    };
                    self.store.patch_restaurant(&existing.id, patch).await?;
                    tracing::debug!(restaurant = %existing.id, name = %scraped.name, "updated scraped restaurant");
                    existing.id
                }
                None => {
                    let doc = RestaurantDoc {
                        key: Some(scraped.key.clone()),
                        name: scraped.name.clone(),
                        rating: scraped.rating,
                        location: scraped.location,
                        address: scraped.address,
                        website_url: scraped.website_url,
                        yelp_url: scraped.yelp_url,
                        open_table_url: scraped.open_table_url,
                        categories: scraped.categories,
                        brunch_price: None,
                        lunch_price: None,
                        dinner_price: None,
                    };
                    let id = self.store.insert_restaurant(doc).await?;
                    tracing::debug!(restaurant = %id, name = %scraped.name, "created scraped restaurant");
                    id
                }
            };
            report.restaurants_processed += 1;

            // Menu upsert on the (restaurant, event, meal) key
            let mut price_patch = RestaurantPatch::default();
            for menu in scraped.menus {
                let Some(price) = menu.price else {
                    tracing::warn!(name = %scraped.name, "skipping menu without a price");
                    continue;
                };
                let meal: MealType = match menu.meal.parse() {
                    Ok(meal) => meal,
                    Err(_) => {
                        tracing::warn!(
                            name = %scraped.name,
                            meal = %menu.meal,
                            "skipping menu with unknown meal type"
                        );
                        continue;
                    }
                };

                match meal {
                    MealType::Brunch => price_patch.brunch_price = Some(price),
                    MealType::Lunch => price_patch.lunch_price = Some(price),
                    MealType::Dinner => price_patch.dinner_price = Some(price),
                }

                match self
                    .store
                    .find_menu(&restaurant_id, event_id, meal)
                    .await?
                {
                    Some(existing_menu) => {
                        self.store
                            .update_menu(&existing_menu.id, price, menu.url, sync_time)
                            .await?;
                    }
                    None => {
                        self.store
                            .insert_menu(MenuDoc {
                                restaurant: restaurant_id.clone(),
                                event: event_id.clone(),
                                meal,
                                price,
                                url: menu.url,
                                sync_time,
                            })
                            .await?;
                    }
                }
                report.menus_processed += 1;
            }

            // Propagate menu prices onto the record the filters read
            if !price_patch.is_empty() {
                self.store
                    .patch_restaurant(&restaurant_id, price_patch)
                    .await?;
            }

            if coordinates_touched {
                self.sync_after_write(&restaurant_id).await;
            }
        }

        self.store.touch_event_sync_time(event_id, sync_time).await?;

        tracing::info!(
            event = %event_id,
            restaurants = report.restaurants_processed,
            menus = report.menus_processed,
            "ingest batch complete"
        );
        Ok(report)
    }
}
