//! # Playback Scheduling
//!
//! Drives the unattended slideshow over the local media inventory.
//!
//! ## Overview
//!
//! The [`PlaybackScheduler`] walks the store's inventory in order: images
//! stay up for a configured number of seconds, videos run until the host
//! reports natural completion. When the inventory is exhausted the scheduler
//! runs one sync cycle and starts over; when the inventory is empty it hands
//! off to the retry poller, which re-checks the remote once a minute until
//! media appears.
//!
//! ## Components
//!
//! - **Playback Scheduler** (`scheduler`): the state machine over the
//!   inventory, with a single `advance` point shared by the image timer and
//!   the video-finished signal
//! - **Retry Poller** (`retry`): the fixed-cadence empty-inventory poll
//! - **Configuration** (`config`): slide duration and poll cadence

pub mod config;
pub mod retry;
pub mod scheduler;

pub use config::PlaybackConfig;
pub use scheduler::{PlayState, PlaybackScheduler};
