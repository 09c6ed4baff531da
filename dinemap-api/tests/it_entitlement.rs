//! Entitlement gate integration tests.
//!
//! Every bounds-query entry point keeps the gate in its call path: the
//! free-tier endpoint fails closed above one filter dimension, and the
//! authenticated endpoint admits only an explicit billing allow.

mod support;

use async_trait::async_trait;
use dinemap_api::{
    ApiError, DinemapBuilder, Entitlement, EntitlementClient, MealType, PriceBound,
    RestaurantFilter, StaticAuth, StaticEntitlements, UserId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use support::{memory_dinemap, seed_bay_area, sf_rect};

fn two_dimensions() -> RestaurantFilter {
    RestaurantFilter::default()
        .with_bound(MealType::Brunch, PriceBound::at_least(10.0))
        .with_categories(["American", "French"])
}

#[tokio::test]
async fn free_tier_allows_one_dimension() {
    let dinemap = memory_dinemap();
    seed_bay_area(&dinemap).await;

    let one_dim =
        RestaurantFilter::default().with_bound(MealType::Brunch, PriceBound::at_least(10.0));
    assert_eq!(one_dim.dimension_count(), 1);
    dinemap
        .query_restaurants_in_bounds(&sf_rect(), None, None, &one_dim)
        .await
        .unwrap();
}

#[tokio::test]
async fn free_tier_rejects_two_dimensions_without_calling_billing() {
    // A billing client that counts calls: the free-tier endpoint must
    // fail closed on its own, not consult billing
    #[derive(Default)]
    struct CountingClient(AtomicUsize);

    #[async_trait]
    impl EntitlementClient for CountingClient {
        async fn check(
            &self,
            _customer: Option<&UserId>,
            _feature_id: &str,
        ) -> Result<Entitlement, dinemap_core::Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Entitlement { allowed: true })
        }
    }

    let client = Arc::new(CountingClient::default());
    let dinemap = DinemapBuilder::memory()
        .with_entitlements(client.clone())
        .build_memory();
    seed_bay_area(&dinemap).await;

    let filter = two_dimensions();
    assert_eq!(filter.dimension_count(), 2);
    let err = dinemap
        .query_restaurants_in_bounds(&sf_rect(), None, None, &filter)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::PremiumRequired { .. }));
    assert_eq!(client.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn authenticated_path_admits_entitled_users() {
    let dinemap = support::premium_dinemap();
    seed_bay_area(&dinemap).await;

    let page = dinemap
        .query_restaurants_in_bounds_with_auth(&sf_rect(), None, None, &two_dimensions())
        .await
        .unwrap();
    // Zuni (brunch 45, American) is the only brunch-priced American
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Zuni Café");
}

#[tokio::test]
async fn authenticated_path_rejects_unentitled_users() {
    let dinemap = DinemapBuilder::memory()
        .with_entitlements(Arc::new(StaticEntitlements::deny_all()))
        .with_auth(Arc::new(StaticAuth::user("user-7")))
        .build_memory();
    seed_bay_area(&dinemap).await;

    let err = dinemap
        .query_restaurants_in_bounds_with_auth(&sf_rect(), None, None, &two_dimensions())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::PremiumRequired { .. }));
}

#[tokio::test]
async fn billing_failure_fails_closed() {
    struct BrokenBilling;

    #[async_trait]
    impl EntitlementClient for BrokenBilling {
        async fn check(
            &self,
            _customer: Option<&UserId>,
            _feature_id: &str,
        ) -> Result<Entitlement, dinemap_core::Error> {
            Err(dinemap_core::Error::upstream("billing service unreachable"))
        }
    }

    let dinemap = DinemapBuilder::memory()
        .with_entitlements(Arc::new(BrokenBilling))
        .with_auth(Arc::new(StaticAuth::user("user-7")))
        .build_memory();
    seed_bay_area(&dinemap).await;

    let err = dinemap
        .query_restaurants_in_bounds_with_auth(&sf_rect(), None, None, &two_dimensions())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::PremiumRequired { .. }));
}

#[tokio::test]
async fn authenticated_path_skips_billing_below_threshold() {
    // Even against deny-all billing, a single dimension never reaches it
    let dinemap = DinemapBuilder::memory()
        .with_entitlements(Arc::new(StaticEntitlements::deny_all()))
        .with_auth(Arc::new(StaticAuth::user("user-7")))
        .build_memory();
    seed_bay_area(&dinemap).await;

    let one_dim = RestaurantFilter::default().with_categories(["Mexican"]);
    let page = dinemap
        .query_restaurants_in_bounds_with_auth(&sf_rect(), None, None, &one_dim)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "La Taqueria");
}
