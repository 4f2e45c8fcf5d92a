//! Catalog service response types
//!
//! Data structures for deserializing the catalog's `/changes` payload.

use bridge_traits::catalog::ChangeSet;
use serde::Deserialize;

/// The `/changes` response body.
///
/// Both fields are required: a payload missing either list is rejected at
/// the boundary rather than treated as empty, so a truncated or incompatible
/// server response fails the whole fetch.
#[derive(Debug, Deserialize)]
pub struct ChangesPayload {
    /// Files added or updated on the remote
    pub changed_files: Vec<String>,

    /// Files removed on the remote
    pub deleted_files: Vec<String>,
}

impl From<ChangesPayload> for ChangeSet {
    fn from(payload: ChangesPayload) -> Self {
        ChangeSet {
            changed: payload.changed_files.into_iter().collect(),
            deleted: payload.deleted_files.into_iter().collect(),
        }
    }
}
