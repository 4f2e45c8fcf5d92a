//! # Sync Engine
//!
//! Keeps the local media store consistent with the remote catalog.
//!
//! ## Overview
//!
//! One sync cycle fetches the change descriptor, downloads every changed
//! file, and deletes every removed file. The cycle tolerates partial
//! failure: one bad transfer or one filesystem fault never blocks the
//! remaining files, and the whole outcome is aggregated into a
//! [`SyncReport`] instead of being thrown upward.
//!
//! ## Components
//!
//! - **Sync Orchestrator** (`orchestrator`): runs single-flight
//!   reconciliation cycles against the store
//! - **Sync Report** (`report`): the aggregate per-cycle outcome and its
//!   derived user-visible status

pub mod orchestrator;
pub mod report;

pub use orchestrator::SyncOrchestrator;
pub use report::{SyncReport, SyncStatus};
