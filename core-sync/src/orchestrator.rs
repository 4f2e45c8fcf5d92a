//! # Sync Orchestrator
//!
//! Reconciles the local media store against the remote change descriptor.
//!
//! ## Workflow
//!
//! 1. Fetch the change descriptor; a failure here ends the cycle with only
//!    `fetch_error` set and nothing touched on disk
//! 2. Make sure the media root exists
//! 3. Download every changed file sequentially, continuing past failures
//! 4. Delete every removed file sequentially, continuing past failures
//! 5. Return the aggregate [`SyncReport`]
//!
//! The same `run()` serves every trigger — startup, playlist exhaustion,
//! and the empty-inventory retry poll — so there is exactly one copy of the
//! reconciliation logic. Cycles are single-flight: an internal mutex queues
//! a concurrent caller behind the in-flight cycle instead of starting a
//! second one against the same directory.

use bridge_traits::catalog::CatalogSource;
use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
use core_store::MediaStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::report::SyncReport;

/// Orchestrates one reconciliation cycle at a time.
pub struct SyncOrchestrator {
    catalog: Arc<dyn CatalogSource>,
    store: MediaStore,
    event_bus: Arc<EventBus>,

    /// Held for the whole cycle; later callers queue here.
    in_flight: Mutex<()>,
}

impl SyncOrchestrator {
    pub fn new(catalog: Arc<dyn CatalogSource>, store: MediaStore, event_bus: Arc<EventBus>) -> Self {
        Self {
            catalog,
            store,
            event_bus,
            in_flight: Mutex::new(()),
        }
    }

    /// Run one sync cycle and report the outcome.
    ///
    /// Never fails: per-file errors are collected into the report, and a
    /// catalog fetch failure is reported as `fetch_error`. If another cycle
    /// is in flight, this call waits for it to finish before starting.
    #[instrument(skip(self))]
    pub async fn run(&self) -> SyncReport {
        let _guard = self.in_flight.lock().await;

        self.event_bus.emit(CoreEvent::Sync(SyncEvent::Started));
        let report = self.run_cycle().await;

        match &report.fetch_error {
            Some(message) => {
                warn!(error = %message, "sync cycle failed before touching any file");
                self.event_bus.emit(CoreEvent::Sync(SyncEvent::Failed {
                    message: message.clone(),
                }));
            }
            None => {
                info!(
                    downloaded = report.downloaded,
                    deleted = report.deleted,
                    failed = report.failure_count(),
                    "sync cycle finished"
                );
                self.event_bus.emit(CoreEvent::Sync(SyncEvent::Completed {
                    downloaded: report.downloaded,
                    deleted: report.deleted,
                    failed: report.failure_count(),
                }));
            }
        }

        report
    }

    async fn run_cycle(&self) -> SyncReport {
        let changes = match self.catalog.fetch_changes().await {
            Ok(changes) => changes,
            Err(e) => return SyncReport::fetch_failed(e.to_string()),
        };

        let mut report = SyncReport::default();

        if !changes.changed.is_empty() {
            // Downloads need somewhere to land; if this fails the writes
            // below fail and are counted individually.
            if let Err(e) = self.store.ensure_root().await {
                warn!(error = %e, "could not create media root");
            }
        }

        for name in &changes.changed {
            let outcome = match self.catalog.open_file(name).await {
                Ok(reader) => self
                    .store
                    .write(name, reader)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(bytes) => {
                    debug!(name, bytes, "downloaded");
                    report.downloaded += 1;
                }
                Err(error) => {
                    warn!(name, %error, "download failed, continuing with remaining files");
                    report.failed_downloads.insert(name.clone());
                }
            }
        }

        for name in &changes.deleted {
            match self.store.delete(name).await {
                Ok(()) => {
                    debug!(name, "removed");
                    report.deleted += 1;
                }
                Err(error) => {
                    warn!(name, %error, "delete failed, continuing with remaining files");
                    report.failed_deletes.insert(name.clone());
                }
            }
        }

        report
    }
}
