//! Core data model and document-store contracts for dinemap.
//!
//! This crate holds everything the rest of the workspace agrees on:
//!
//! - The record types: [`Restaurant`], [`Event`], [`Menu`], and their
//!   insert/patch payloads
//! - Geographic primitives: [`GeoPoint`] and [`GeoRect`], with validation
//! - The document-store traits ([`RestaurantStore`], [`EventStore`],
//!   [`MenuStore`]) that abstract the hosted database, plus the
//!   [`MemoryStore`] reference implementation used for embedded mode
//!   and tests
//! - The shared [`Error`] type
//!
//! The store traits are deliberately typed per collection. The hosted
//! backend this models exposes a dynamic predicate-builder query API;
//! here each access path the product actually uses is a named method, so
//! the filter semantics stay hand-coded and testable instead of being
//! derived from opaque expression trees.

pub mod error;
pub mod event;
pub mod geo;
pub mod memory;
pub mod restaurant;
pub mod store;

pub use error::{Error, Result};
pub use event::{Event, EventDoc, EventId, Menu, MenuDoc, MenuId};
pub use geo::{GeoPoint, GeoRect};
pub use memory::MemoryStore;
pub use restaurant::{
    MealType, Restaurant, RestaurantDoc, RestaurantId, RestaurantPatch, UserId,
};
pub use store::{DocumentStore, EventStore, MenuStore, RestaurantStore};
