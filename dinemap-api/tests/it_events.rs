//! Event, menu, and ingestion integration tests.

mod support;

use chrono::{TimeZone, Utc};
use dinemap_api::{
    ApiError, EventDoc, EventId, GeoPoint, MealType, RestaurantStore, ScrapedMenu,
    ScrapedRestaurant,
};
use support::memory_dinemap;

fn restaurant_week_doc() -> EventDoc {
    EventDoc {
        name: "SF Restaurant Week".to_string(),
        start_date: Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap(),
        location: GeoPoint::new(37.7749, -122.4194),
        website_url: Some("https://www.sfrestaurantweek.com".to_string()),
    }
}

fn scraped_zuni() -> ScrapedRestaurant {
    let mut scraped = ScrapedRestaurant::new("zuni-hash", "Zuni Café");
    scraped.rating = Some(4.5);
    scraped.location = Some(GeoPoint::new(37.7789, -122.4221));
    scraped.categories = vec!["American".to_string(), "Mediterranean".to_string()];
    scraped.menus = vec![
        ScrapedMenu {
            meal: "Lunch".to_string(),
            price: Some(45.0),
            url: None,
        },
        ScrapedMenu {
            meal: "dinner".to_string(),
            price: Some(65.0),
            url: Some("https://zunicafe.com/rw".to_string()),
        },
    ];
    scraped
}

#[tokio::test]
async fn ingest_creates_restaurants_menus_and_counts() {
    let dinemap = memory_dinemap();
    let event_id = dinemap.add_event(restaurant_week_doc()).await.unwrap();

    let report = dinemap
        .ingest_scraped_restaurants(&event_id, vec![scraped_zuni()])
        .await
        .unwrap();
    assert_eq!(report.restaurants_processed, 1);
    assert_eq!(report.menus_processed, 2);

    // Menu prices propagate onto the restaurant record
    let zuni = dinemap
        .store()
        .find_restaurant_by_key("zuni-hash")
        .await
        .unwrap()
        .expect("ingested restaurant");
    assert_eq!(zuni.lunch_price, Some(45.0));
    assert_eq!(zuni.dinner_price, Some(65.0));
    assert!(zuni.brunch_price.is_none());

    // Counts are computed from menus at read time
    let summary = dinemap
        .get_event_by_name("SF Restaurant Week")
        .await
        .unwrap()
        .expect("event by name");
    assert_eq!(summary.menu_count, 2);
    assert_eq!(summary.restaurant_count, 1);
    assert!(summary.event.sync_time.is_some());

    let participants = dinemap
        .restaurants_for_event("SF Restaurant Week")
        .await
        .unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Zuni Café");
}

#[tokio::test]
async fn reingesting_updates_in_place_without_duplicates() {
    let dinemap = memory_dinemap();
    let event_id = dinemap.add_event(restaurant_week_doc()).await.unwrap();

    dinemap
        .ingest_scraped_restaurants(&event_id, vec![scraped_zuni()])
        .await
        .unwrap();

    // Second crawl: same key, new dinner price
    let mut again = scraped_zuni();
    again.menus = vec![ScrapedMenu {
        meal: "Dinner".to_string(),
        price: Some(70.0),
        url: None,
    }];
    dinemap
        .ingest_scraped_restaurants(&event_id, vec![again])
        .await
        .unwrap();

    // Still one restaurant, still one dinner menu, updated price
    assert_eq!(dinemap.list_restaurants().await.unwrap().len(), 1);
    let menus = dinemap.menus_for_event(&event_id).await.unwrap();
    assert_eq!(menus.len(), 2);
    let dinner = menus
        .iter()
        .find(|m| m.meal == MealType::Dinner)
        .expect("dinner menu");
    assert_eq!(dinner.price, 70.0);
    // The first crawl's url survives an update that carries none
    assert_eq!(dinner.url.as_deref(), Some("https://zunicafe.com/rw"));

    let zuni = dinemap
        .store()
        .find_restaurant_by_key("zuni-hash")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zuni.dinner_price, Some(70.0));
}

#[tokio::test]
async fn junk_rows_fail_soft() {
    let dinemap = memory_dinemap();
    let event_id = dinemap.add_event(restaurant_week_doc()).await.unwrap();

    let nameless = ScrapedRestaurant::new("k1", "");
    let mut odd_meals = ScrapedRestaurant::new("k2", "Brunch Only Bistro");
    odd_meals.menus = vec![
        ScrapedMenu {
            meal: "supper".to_string(),
            price: Some(30.0),
            url: None,
        },
        ScrapedMenu {
            meal: "brunch".to_string(),
            price: None,
            url: None,
        },
        ScrapedMenu {
            meal: "brunch".to_string(),
            price: Some(25.0),
            url: None,
        },
    ];

    let report = dinemap
        .ingest_scraped_restaurants(&event_id, vec![nameless, odd_meals])
        .await
        .unwrap();
    assert_eq!(report.restaurants_processed, 1);
    assert_eq!(report.menus_processed, 1);

    let menus = dinemap.menus_for_event(&event_id).await.unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].meal, MealType::Brunch);
}

#[tokio::test]
async fn ingest_into_missing_event_is_not_found() {
    let dinemap = memory_dinemap();
    let err = dinemap
        .ingest_scraped_restaurants(&EventId::new("missing"), vec![scraped_zuni()])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn active_events_filter_by_end_date_and_sort_by_start() {
    let dinemap = memory_dinemap();

    let mut seafood_week = restaurant_week_doc();
    seafood_week.name = "Bay Area Seafood Week".to_string();
    seafood_week.start_date = Utc.with_ymd_and_hms(2025, 2, 15, 0, 0, 0).unwrap();
    seafood_week.end_date = Utc.with_ymd_and_hms(2025, 2, 22, 23, 59, 59).unwrap();

    let mut food_crawl = restaurant_week_doc();
    food_crawl.name = "Mission District Food Crawl".to_string();
    food_crawl.start_date = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    food_crawl.end_date = Utc.with_ymd_and_hms(2025, 3, 15, 23, 59, 59).unwrap();

    dinemap.add_event(seafood_week).await.unwrap();
    dinemap.add_event(food_crawl).await.unwrap();
    dinemap.add_event(restaurant_week_doc()).await.unwrap(); // ends Jan 31

    // Early February: restaurant week is over, the other two remain
    let now = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
    let active = dinemap.list_active_events_at(now).await.unwrap();
    let names: Vec<&str> = active.iter().map(|s| s.event.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Bay Area Seafood Week", "Mission District Food Crawl"]
    );

    // During an event it still counts as active
    let mid_event = Utc.with_ymd_and_hms(2025, 2, 20, 0, 0, 0).unwrap();
    let active = dinemap.list_active_events_at(mid_event).await.unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn menus_for_restaurant_spans_events() {
    let dinemap = memory_dinemap();
    let week = dinemap.add_event(restaurant_week_doc()).await.unwrap();

    let mut seafood = restaurant_week_doc();
    seafood.name = "Bay Area Seafood Week".to_string();
    let seafood = dinemap.add_event(seafood).await.unwrap();

    dinemap
        .ingest_scraped_restaurants(&week, vec![scraped_zuni()])
        .await
        .unwrap();
    let mut seafood_menu = scraped_zuni();
    seafood_menu.menus = vec![ScrapedMenu {
        meal: "lunch".to_string(),
        price: Some(50.0),
        url: None,
    }];
    dinemap
        .ingest_scraped_restaurants(&seafood, vec![seafood_menu])
        .await
        .unwrap();

    let zuni = dinemap
        .store()
        .find_restaurant_by_key("zuni-hash")
        .await
        .unwrap()
        .unwrap();
    let menus = dinemap.menus_for_restaurant(&zuni.id).await.unwrap();
    assert_eq!(menus.len(), 3);
}
