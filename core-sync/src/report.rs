//! Aggregate outcome of one sync cycle.
//!
//! A cycle never aborts because one file failed; every attempted operation
//! lands in the report, and the caller derives user-visible status from it.

use std::collections::BTreeSet;

/// Per-cycle reconciliation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files downloaded and made visible in the store.
    pub downloaded: usize,

    /// Files whose download or write failed.
    pub failed_downloads: BTreeSet<String>,

    /// Files removed (or already absent) from the store.
    pub deleted: usize,

    /// Files whose removal failed.
    pub failed_deletes: BTreeSet<String>,

    /// Set when the change descriptor itself could not be fetched; in that
    /// case no download or delete was attempted.
    pub fetch_error: Option<String>,
}

impl SyncReport {
    /// Report for a cycle that never got past the catalog request.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of per-file operations that failed.
    pub fn failure_count(&self) -> usize {
        self.failed_downloads.len() + self.failed_deletes.len()
    }

    /// Derived user-visible status.
    pub fn status(&self) -> SyncStatus {
        if self.fetch_error.is_some() {
            SyncStatus::Failure
        } else if self.failure_count() > 0 {
            SyncStatus::PartialFailure
        } else {
            SyncStatus::Success
        }
    }
}

/// User-visible classification of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Every attempted operation succeeded.
    Success,
    /// The catalog was reachable but some files failed.
    PartialFailure,
    /// The catalog was unreachable or malformed; nothing was touched.
    Failure,
}
