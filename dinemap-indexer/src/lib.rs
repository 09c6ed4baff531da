//! Index sync reconciliation for dinemap.
//!
//! The spatial index is derived data; the document store is the source
//! of truth. This crate keeps the two consistent:
//!
//! - [`sync_one`] reconciles a single restaurant after a write: located
//!   records are upserted into the index, unlocated records are evicted
//!   from it
//! - [`sync_all`] is the bulk resync - a migration utility that is
//!   idempotent and safe to re-run or resume after a crash, because
//!   every step is an upsert
//! - [`SyncWorker`] runs reconciliation as a deferred, fire-and-forget
//!   follow-up to writes, the deliberate eventual-consistency choice: a
//!   restaurant may be briefly absent from map results after creation
//!
//! No "already synced" flag exists anywhere here; how often to invoke
//! the bulk resync is caller policy.

pub mod error;
pub mod reconciler;
pub mod worker;

pub use error::{IndexerError, Result};
pub use reconciler::{sync_all, sync_one, SyncOutcome, SyncReport};
pub use worker::{SyncRequest, SyncWorker, SyncWorkerHandle};
