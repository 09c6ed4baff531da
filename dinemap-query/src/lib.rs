//! Bounded query orchestration for dinemap.
//!
//! Composes the spatial index and the document store into the product's
//! central read path: a map viewport plus a filter set in, a page of
//! matching restaurants plus a continuation cursor out.
//!
//! # Filter semantics
//!
//! Price bounds are disjunctive across meal dimensions ("any of these
//! meal budgets works for me") while the category constraint is
//! conjunctive with the price result ("and it must be one of these
//! cuisines"). The predicates are hand-coded in [`filter`] rather than
//! assembled from a boolean-expression DSL so the edge cases - unset
//! bounds, missing prices, inverted ranges - stay explicit and tested.
//!
//! # Gating
//!
//! Combining more than one filter dimension is a premium feature. The
//! [`entitlement`] module counts active dimensions and checks the
//! billing collaborator, failing closed.

pub mod bounds;
pub mod entitlement;
pub mod error;
pub mod filter;

pub use bounds::{run_bounded_query, QueryPage};
pub use entitlement::{
    AuthProvider, Entitlement, EntitlementClient, FeatureGate, StaticAuth, StaticEntitlements,
    ADVANCED_FILTERS_FEATURE,
};
pub use error::{QueryError, Result};
pub use filter::{PriceBound, RestaurantFilter};
