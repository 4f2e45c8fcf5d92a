//! Remote Catalog Abstraction
//!
//! The core never talks to the network directly; it consumes a
//! [`CatalogSource`] that can report which files changed on the remote side
//! and hand out the bytes of an individual file.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::Result;

/// One round of remote changes, as declared by the catalog service.
///
/// Filenames are opaque leaf names, unique within each set (duplicates on
/// the wire collapse). A `ChangeSet` is consumed by exactly one sync cycle
/// and then discarded; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Files added or updated on the remote since the last fetch.
    pub changed: BTreeSet<String>,

    /// Files removed on the remote since the last fetch.
    pub deleted: BTreeSet<String>,
}

impl ChangeSet {
    /// Returns `true` when there is nothing to download and nothing to delete.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deleted.is_empty()
    }
}

/// Remote catalog capability.
///
/// Implementations issue one request per call and surface transport or
/// protocol faults as [`BridgeError`](crate::error::BridgeError). The sync
/// orchestrator treats a `fetch_changes` failure as fatal to the cycle and
/// an `open_file` failure as local to that one file.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the change descriptor.
    ///
    /// Fails on a non-success status or when the payload is missing either
    /// required file list. Partial descriptors are never returned.
    async fn fetch_changes(&self) -> Result<ChangeSet>;

    /// Open a byte stream for one remote file.
    ///
    /// The returned reader streams the body; implementations must not
    /// buffer whole payloads in memory.
    async fn open_file(&self, name: &str) -> Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_set_collapses_duplicates() {
        let mut set = ChangeSet::default();
        set.changed.insert("a.jpg".to_string());
        set.changed.insert("a.jpg".to_string());

        assert_eq!(set.changed.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn empty_change_set() {
        assert!(ChangeSet::default().is_empty());
    }
}
