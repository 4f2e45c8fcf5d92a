//! # Host Bridge Traits
//!
//! Capability traits that must be implemented by the surrounding host.
//!
//! ## Overview
//!
//! This crate defines the contract between the viewer core and everything it
//! deliberately does not own: the remote catalog transport and the rendering
//! surface. Each trait represents a capability the core requires but that the
//! host supplies.
//!
//! ## Traits
//!
//! - [`CatalogSource`](catalog::CatalogSource) - fetch the remote change
//!   descriptor and stream individual file bodies
//! - [`MediaSurface`](surface::MediaSurface) - display images and videos on
//!   the host's rendering widgets
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations convert their internal errors into it at the seam and
//! keep the message actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so trait objects can be
//! shared across async tasks behind `Arc`.

pub mod catalog;
pub mod error;
pub mod surface;

pub use error::BridgeError;

// Re-export commonly used types
pub use catalog::{CatalogSource, ChangeSet};
pub use surface::MediaSurface;
