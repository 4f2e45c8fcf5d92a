//! Full sync-cycle tests against a real temp-directory store.

use async_trait::async_trait;
use bridge_traits::catalog::{CatalogSource, ChangeSet};
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
use core_store::MediaStore;
use core_sync::{SyncOrchestrator, SyncStatus};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::AsyncRead;

/// Serves a fixed change set; file bodies come from memory, and any name
/// not in the map fails its transfer.
struct StubCatalog {
    changes: ChangeSet,
    files: HashMap<String, Vec<u8>>,
    active_fetches: AtomicUsize,
    max_concurrent_fetches: AtomicUsize,
}

impl StubCatalog {
    fn new(changed: &[&str], deleted: &[&str], files: &[(&str, &[u8])]) -> Self {
        let changes = ChangeSet {
            changed: changed.iter().map(|s| s.to_string()).collect(),
            deleted: deleted.iter().map(|s| s.to_string()).collect(),
        };
        Self {
            changes,
            files: files
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_vec()))
                .collect(),
            active_fetches: AtomicUsize::new(0),
            max_concurrent_fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_changes(&self) -> BridgeResult<ChangeSet> {
        let active = self.active_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent_fetches
            .fetch_max(active, Ordering::SeqCst);

        // Give a would-be concurrent cycle every chance to interleave.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        self.active_fetches.fetch_sub(1, Ordering::SeqCst);
        Ok(self.changes.clone())
    }

    async fn open_file(&self, name: &str) -> BridgeResult<Box<dyn AsyncRead + Send + Unpin>> {
        match self.files.get(name) {
            Some(body) => Ok(Box::new(std::io::Cursor::new(body.clone()))),
            None => Err(BridgeError::OperationFailed(format!(
                "simulated transfer fault for {name}"
            ))),
        }
    }
}

static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!(
        "sync-cycle-test-{}-{}",
        std::process::id(),
        DIR_SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

fn names(set: &BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn partial_failure_never_shrinks_the_attempted_set() {
    let root = temp_root();
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("c.jpg"), b"stale").unwrap();

    // a.jpg downloads fine, b.mp4 hits a transfer fault, c.jpg is removed.
    let catalog = StubCatalog::new(
        &["a.jpg", "b.mp4"],
        &["c.jpg"],
        &[("a.jpg", b"fresh image")],
    );
    let store = MediaStore::new(&root);
    let orchestrator = SyncOrchestrator::new(
        Arc::new(catalog),
        store.clone(),
        Arc::new(EventBus::default()),
    );

    let report = orchestrator.run().await;

    assert_eq!(report.downloaded, 1);
    assert_eq!(names(&report.failed_downloads), vec!["b.mp4"]);
    assert_eq!(report.deleted, 1);
    assert!(report.failed_deletes.is_empty());
    assert!(report.fetch_error.is_none());
    assert_eq!(report.status(), SyncStatus::PartialFailure);

    assert!(root.join("a.jpg").exists());
    assert!(!root.join("b.mp4").exists());
    assert!(!root.join("c.jpg").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn deleting_a_file_that_never_existed_counts_as_success() {
    let root = temp_root();

    let catalog = StubCatalog::new(&[], &["missing.jpg"], &[]);
    let store = MediaStore::new(&root);
    let orchestrator = SyncOrchestrator::new(
        Arc::new(catalog),
        store,
        Arc::new(EventBus::default()),
    );

    let report = orchestrator.run().await;

    assert_eq!(report.deleted, 1);
    assert!(report.failed_deletes.is_empty());
    assert_eq!(report.status(), SyncStatus::Success);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn concurrent_runs_are_single_flight() {
    let root = temp_root();

    let catalog = Arc::new(StubCatalog::new(&[], &[], &[]));
    let store = MediaStore::new(&root);
    let orchestrator = Arc::new(SyncOrchestrator::new(
        catalog.clone(),
        store,
        Arc::new(EventBus::default()),
    ));

    let a = orchestrator.clone();
    let b = orchestrator.clone();
    let (first, second) = tokio::join!(
        tokio::spawn(async move { a.run().await }),
        tokio::spawn(async move { b.run().await }),
    );
    first.unwrap();
    second.unwrap();

    // Both triggers got a full cycle, but never at the same time.
    assert_eq!(catalog.max_concurrent_fetches.load(Ordering::SeqCst), 1);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn cycle_outcome_is_published_on_the_event_bus() {
    let root = temp_root();
    std::fs::create_dir_all(&root).unwrap();

    let catalog = StubCatalog::new(&["a.jpg"], &[], &[("a.jpg", b"bytes")]);
    let store = MediaStore::new(&root);
    let event_bus = Arc::new(EventBus::default());
    let mut events = event_bus.subscribe();

    let orchestrator = SyncOrchestrator::new(Arc::new(catalog), store, event_bus);
    orchestrator.run().await;

    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Sync(SyncEvent::Started)
    );
    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::Sync(SyncEvent::Completed {
            downloaded: 1,
            deleted: 0,
            failed: 0,
        })
    );

    let _ = std::fs::remove_dir_all(&root);
}
