//! Deferred sync worker.
//!
//! Write paths should not block on index reconciliation, and a failed
//! sync must never fail the triggering write. The worker owns that
//! policy: writers drop a request on an unbounded channel and move on;
//! the worker reconciles in the background and logs failures at `warn`.
//!
//! Tests needing determinism either sync inline (no worker) or drop the
//! handle and await [`SyncWorker::join`], which drains the queue.

use crate::reconciler::{sync_all, sync_one};
use dinemap_core::{RestaurantId, RestaurantStore};
use dinemap_spatial::SpatialIndex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A reconciliation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRequest {
    /// Reconcile one restaurant.
    One(RestaurantId),
    /// Bulk resync of every restaurant.
    All,
}

/// Sending half: cheap to clone, handed to write paths.
#[derive(Debug, Clone)]
pub struct SyncWorkerHandle {
    tx: mpsc::UnboundedSender<SyncRequest>,
}

impl SyncWorkerHandle {
    /// Request reconciliation of one restaurant. Never blocks; a
    /// stopped worker makes this a no-op.
    pub fn trigger(&self, id: RestaurantId) {
        let _ = self.tx.send(SyncRequest::One(id));
    }

    /// Request a bulk resync.
    pub fn trigger_all(&self) {
        let _ = self.tx.send(SyncRequest::All);
    }
}

/// A running reconciliation worker.
pub struct SyncWorker {
    task: JoinHandle<()>,
}

impl SyncWorker {
    /// Spawn a worker over the given store and index.
    ///
    /// The worker runs until every handle is dropped and the queue is
    /// drained.
    pub fn spawn<S, G>(store: Arc<S>, index: Arc<G>) -> (Self, SyncWorkerHandle)
    where
        S: RestaurantStore + 'static,
        G: SpatialIndex + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<SyncRequest>();

        let task = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let result = match &request {
                    SyncRequest::One(id) => {
                        sync_one(store.as_ref(), index.as_ref(), id).await.map(|_| ())
                    }
                    SyncRequest::All => {
                        sync_all(store.as_ref(), index.as_ref()).await.map(|_| ())
                    }
                };
                if let Err(err) = result {
                    // Deferred sync must not surface to the writer
                    tracing::warn!(?request, error = %err, "deferred index sync failed");
                }
            }
        });

        (Self { task }, SyncWorkerHandle { tx })
    }

    /// Wait for the worker to drain and stop.
    ///
    /// Only returns once every [`SyncWorkerHandle`] has been dropped.
    pub async fn join(self) {
        let _ = self.task.await;
    }

    /// Abort the worker without draining.
    pub fn abort(&self) {
        self.task.abort();
    }
}
