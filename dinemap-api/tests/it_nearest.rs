//! Nearest-neighbor query integration tests.

mod support;

use dinemap_api::{ApiError, GeoPoint, IndexEntry, RestaurantId, SpatialIndex};
use support::{memory_dinemap, seed_bay_area};

#[tokio::test]
async fn nearest_come_back_in_distance_order_with_distances() {
    let dinemap = memory_dinemap();
    seed_bay_area(&dinemap).await;

    // Market & Gough, a block from Zuni
    let origin = GeoPoint::new(37.7720, -122.4220);
    let results = dinemap
        .query_nearest_restaurants(&origin, None, None)
        .await
        .unwrap();

    assert_eq!(results.len(), 6);
    assert_eq!(results[0].restaurant.name, "Zuni Café");
    for pair in results.windows(2) {
        assert!(pair[0].distance_meters <= pair[1].distance_meters);
    }
    // The French Laundry is ~70 km out
    assert_eq!(results[5].restaurant.name, "The French Laundry");
    assert!(results[5].distance_meters > 60_000.0);
}

#[tokio::test]
async fn max_results_and_distance_cap_apply() {
    let dinemap = memory_dinemap();
    seed_bay_area(&dinemap).await;

    let origin = GeoPoint::new(37.7720, -122.4220);
    let top2 = dinemap
        .query_nearest_restaurants(&origin, Some(2), None)
        .await
        .unwrap();
    assert_eq!(top2.len(), 2);

    // 10 km keeps the city, drops Yountville
    let city_only = dinemap
        .query_nearest_restaurants(&origin, None, Some(10_000.0))
        .await
        .unwrap();
    assert_eq!(city_only.len(), 5);
    assert!(city_only
        .iter()
        .all(|r| r.restaurant.name != "The French Laundry"));
}

#[tokio::test]
async fn stale_index_entries_are_dropped() {
    let dinemap = memory_dinemap();
    seed_bay_area(&dinemap).await;

    // An index entry whose record is gone from the store
    dinemap
        .index()
        .insert(IndexEntry {
            key: RestaurantId::new("deleted"),
            point: GeoPoint::new(37.7721, -122.4221),
            categories: vec![],
            sort_key: 5.0,
        })
        .await
        .unwrap();

    let origin = GeoPoint::new(37.7720, -122.4220);
    let results = dinemap
        .query_nearest_restaurants(&origin, None, None)
        .await
        .unwrap();
    assert_eq!(results.len(), 6);
    assert!(results
        .iter()
        .all(|r| r.restaurant.id != RestaurantId::new("deleted")));
}

#[tokio::test]
async fn invalid_origin_is_rejected() {
    let dinemap = memory_dinemap();
    let err = dinemap
        .query_nearest_restaurants(&GeoPoint::new(95.0, 0.0), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCoordinates(_)));
}
