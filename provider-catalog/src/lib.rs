//! # Catalog Provider
//!
//! HTTP implementation of the [`CatalogSource`](bridge_traits::catalog::CatalogSource)
//! bridge trait.
//!
//! ## Wire Protocol
//!
//! - `GET {base}/changes` returns `{ "changed_files": [...], "deleted_files": [...] }`;
//!   both arrays are required and a payload missing either is a hard fetch
//!   error, never a partial descriptor
//! - `GET {base}/file?filename=<percent-encoded name>` returns the raw file
//!   body, streamed to the caller
//!
//! Every request carries a bounded timeout so a hung connection fails the
//! cycle instead of stalling it forever.

pub mod client;
pub mod error;
pub mod types;

pub use client::HttpCatalog;
pub use error::{CatalogError, Result};
pub use types::ChangesPayload;
