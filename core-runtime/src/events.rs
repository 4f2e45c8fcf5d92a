//! # Event Bus System
//!
//! Decoupled communication between core modules and the host using
//! `tokio::sync::broadcast`. The sync engine and the playback scheduler emit
//! typed events; the host subscribes and decides what (if anything) to show
//! the user — the core never owns a notification surface.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::events::{EventBus, CoreEvent, SyncEvent};
//!
//! let bus = EventBus::new(100);
//! let mut stream = bus.subscribe();
//!
//! bus.emit(CoreEvent::Sync(SyncEvent::Started));
//! ```
//!
//! ## Error Handling
//!
//! Receivers can observe `RecvError::Lagged(n)` when they fall behind; this
//! is non-fatal and the stream continues with newer events. `RecvError::Closed`
//! signals shutdown. Emitting with no subscribers is not an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Sync-related events
    Sync(SyncEvent),
    /// Playback-related events
    Playback(PlaybackEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Sync(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
        }
    }
}

impl fmt::Display for CoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Events related to synchronization with the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SyncEvent {
    /// A sync cycle began.
    Started,
    /// A sync cycle finished with every attempted operation accounted for.
    Completed {
        /// Files downloaded successfully.
        downloaded: usize,
        /// Files removed successfully.
        deleted: usize,
        /// Files that failed to download or delete.
        failed: usize,
    },
    /// The catalog itself was unreachable or malformed; nothing was touched.
    Failed {
        /// Human-readable error message.
        message: String,
    },
}

impl SyncEvent {
    fn description(&self) -> &str {
        match self {
            SyncEvent::Started => "Sync started",
            SyncEvent::Completed { failed, .. } if *failed > 0 => {
                "Sync completed with some failures"
            }
            SyncEvent::Completed { .. } => "Sync completed successfully",
            SyncEvent::Failed { .. } => "Sync failed",
        }
    }
}

/// Events related to slideshow playback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// Playback started over a freshly loaded inventory.
    Started {
        /// Number of items in the inventory.
        items: usize,
    },
    /// An item was handed to the rendering surface.
    ItemShown {
        /// File name of the item.
        name: String,
        /// Position in the inventory.
        index: usize,
    },
    /// The inventory is empty; the retry poller is watching the remote.
    AwaitingMedia,
    /// Playback was stopped.
    Stopped,
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::Started { .. } => "Playback started",
            PlaybackEvent::ItemShown { .. } => "Showing media item",
            PlaybackEvent::AwaitingMedia => "Waiting for media to appear",
            PlaybackEvent::Stopped => "Playback stopped",
        }
    }
}

/// Central broadcast channel for publishing core events.
///
/// Cloning is cheap; the bus is usually shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create an event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// An event emitted while nobody is subscribed is simply dropped.
    pub fn emit(&self, event: CoreEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("event emitted with no subscribers");
        }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_emitted_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit(CoreEvent::Sync(SyncEvent::Started));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, CoreEvent::Sync(SyncEvent::Started));
    }

    #[tokio::test]
    async fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new(8);
        bus.emit(CoreEvent::Playback(PlaybackEvent::Stopped));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn partial_failure_description() {
        let event = CoreEvent::Sync(SyncEvent::Completed {
            downloaded: 2,
            deleted: 1,
            failed: 1,
        });
        assert_eq!(event.description(), "Sync completed with some failures");
    }

    #[test]
    fn events_serialize_round_trip() {
        let event = CoreEvent::Playback(PlaybackEvent::ItemShown {
            name: "a.jpg".to_string(),
            index: 0,
        });

        let json = serde_json::to_string(&event).unwrap();
        let back: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
