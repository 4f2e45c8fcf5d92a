//! # Local Media Store
//!
//! Owns the managed media directory: a single flat directory of image and
//! video files kept in step with the remote catalog by the sync engine and
//! consumed as an ordered inventory by the playback scheduler.
//!
//! ## Guarantees
//!
//! - `write` is atomic from the reader's perspective: bytes stream into a
//!   `.part` staging file that is renamed into place, so `list` never
//!   observes a half-written file under its final name
//! - `delete` is convergent: the success criterion is "absent afterwards",
//!   so deleting a missing file succeeds
//! - `list` is rebuilt in full on every call and sorted by file name

pub mod error;
pub mod media;
pub mod store;

pub use error::{Result, StoreError};
pub use media::{MediaItem, MediaKind};
pub use store::MediaStore;
