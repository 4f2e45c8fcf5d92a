//! # Playback Scheduler
//!
//! State machine over the local media inventory.
//!
//! ## Transitions
//!
//! - `start()` loads the inventory: empty enters `AwaitingResync` and arms
//!   the retry poller, otherwise playback begins at index 0
//! - images advance on a timer, videos advance when the host reports natural
//!   completion via [`video_finished`](PlaybackScheduler::video_finished)
//! - exhausting the inventory runs one sync cycle and starts over
//! - `stop()` cancels everything pending and returns to `Idle`, from any
//!   state
//!
//! Both the image timer and the video-finished signal funnel into one
//! internal advance step, so the exhaustion-triggers-resync rule lives in
//! exactly one place.
//!
//! The rendering surface is held through a `Weak` reference and upgraded
//! before every call; a torn-down host makes surface calls no-ops instead of
//! keeping the widgets alive.

use bridge_traits::surface::MediaSurface;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use core_store::{MediaItem, MediaKind, MediaStore};
use core_sync::SyncOrchestrator;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::PlaybackConfig;
use crate::retry::RetryScheduler;

/// Current position of the playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Nothing is showing and nothing is scheduled.
    Idle,
    /// An image is on screen; a slide timer is armed.
    PlayingImage { index: usize },
    /// A video is running; the host will signal its completion.
    PlayingVideo { index: usize },
    /// The inventory was empty or exhausted; a sync is pending or the retry
    /// poller is watching the remote.
    AwaitingResync,
}

impl PlayState {
    pub fn is_playing(&self) -> bool {
        matches!(
            self,
            PlayState::PlayingImage { .. } | PlayState::PlayingVideo { .. }
        )
    }
}

struct Inner {
    state: PlayState,
    inventory: Vec<MediaItem>,

    /// Cancelled by `stop()`; every armed timer and retry poll is tied to
    /// it, directly or through a child token.
    session: CancellationToken,

    /// Token of the currently armed retry poller, if any. Child of
    /// `session`.
    poller: Option<CancellationToken>,
}

/// Advances through the media inventory and resynchronizes at the edges.
pub struct PlaybackScheduler {
    surface: Weak<dyn MediaSurface>,
    pub(crate) sync: Arc<SyncOrchestrator>,
    pub(crate) store: MediaStore,
    event_bus: Arc<EventBus>,
    config: PlaybackConfig,
    inner: Mutex<Inner>,
}

impl PlaybackScheduler {
    /// The scheduler never owns its surface; the host passes a `Weak` so
    /// teardown on the host side revokes rendering immediately.
    pub fn new(
        surface: Weak<dyn MediaSurface>,
        sync: Arc<SyncOrchestrator>,
        store: MediaStore,
        event_bus: Arc<EventBus>,
        config: PlaybackConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            surface,
            sync,
            store,
            event_bus,
            config,
            inner: Mutex::new(Inner {
                state: PlayState::Idle,
                inventory: Vec::new(),
                session: CancellationToken::new(),
                poller: None,
            }),
        })
    }

    /// Current state, for hosts that mirror it in their UI.
    pub async fn state(&self) -> PlayState {
        self.inner.lock().await.state
    }

    /// Run one sync cycle, then begin playback.
    ///
    /// This is the foreground startup path: reconcile with the remote first,
    /// then play whatever is present (or begin polling if nothing is).
    pub async fn resync_and_start(self: &Arc<Self>) {
        self.sync.run().await;
        self.start().await;
    }

    /// Load the inventory and begin playback at index 0.
    ///
    /// An empty inventory enters `AwaitingResync` and arms the retry poller
    /// instead. Calling `start()` while something is already playing is
    /// ignored.
    #[instrument(skip(self))]
    pub async fn start(self: &Arc<Self>) {
        self.start_inner(None).await;
    }

    /// `start()` on behalf of the retry poller.
    ///
    /// The poller's token is re-checked under the lock so a `stop()` issued
    /// while the poll's final sync ran is never undone.
    pub(crate) async fn poll_start(self: &Arc<Self>, poll_token: CancellationToken) {
        self.start_inner(Some(poll_token)).await;
    }

    async fn start_inner(self: &Arc<Self>, guard: Option<CancellationToken>) {
        {
            let inner = self.inner.lock().await;
            if inner.state.is_playing() {
                warn!("start ignored, playback already running");
                return;
            }
        }

        // List errors are never fatal to the scheduler; an unreadable root
        // behaves like an empty one and the retry poller keeps watching.
        let inventory = match self.store.list().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "could not list media root, treating as empty");
                Vec::new()
            }
        };

        let mut inner = self.inner.lock().await;
        if inner.state.is_playing() {
            return;
        }
        if let Some(token) = &guard {
            if token.is_cancelled() {
                debug!("stopped while the retry poll was finishing");
                return;
            }
        }
        if inner.session.is_cancelled() {
            inner.session = CancellationToken::new();
        }
        // A fresh empty span restarts the poll clock from zero.
        if let Some(poller) = inner.poller.take() {
            poller.cancel();
        }
        inner.inventory = inventory;

        if inner.inventory.is_empty() {
            inner.state = PlayState::AwaitingResync;
            let poll_token = inner.session.child_token();
            inner.poller = Some(poll_token.clone());
            drop(inner);

            info!("no local media, polling the remote until some appears");
            self.event_bus
                .emit(CoreEvent::Playback(PlaybackEvent::AwaitingMedia));
            RetryScheduler::new(
                Arc::downgrade(self),
                poll_token,
                self.config.poll_interval,
            )
            .spawn();
        } else {
            let items = inner.inventory.len();
            drop(inner);

            info!(items, "starting playback");
            self.event_bus
                .emit(CoreEvent::Playback(PlaybackEvent::Started { items }));
            self.play_index(0).await;
        }
    }

    /// Cancel everything pending and return to `Idle`.
    ///
    /// Safe from any state. After this returns, no armed timer and no retry
    /// poll will fire; a sync already in flight finishes but its completion
    /// does not restart playback.
    #[instrument(skip(self))]
    pub async fn stop(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.session.cancel();
            inner.poller = None;
            inner.state = PlayState::Idle;
        }

        if let Some(surface) = self.surface.upgrade() {
            if let Err(e) = surface.clear().await {
                warn!(error = %e, "failed to clear rendering surface");
            }
        }
        self.event_bus
            .emit(CoreEvent::Playback(PlaybackEvent::Stopped));
        info!("playback stopped");
    }

    /// Host signal that the current video finished playing.
    ///
    /// Only meaningful while a video is actually running; a stale signal
    /// (after `stop()`, or after the schedule moved on) is ignored.
    pub async fn video_finished(self: &Arc<Self>) {
        let next = {
            let inner = self.inner.lock().await;
            if inner.session.is_cancelled() {
                return;
            }
            match inner.state {
                PlayState::PlayingVideo { index } => index + 1,
                _ => {
                    debug!(state = ?inner.state, "ignoring spurious video completion");
                    return;
                }
            }
        };
        self.advance_to(next).await;
    }

    /// Show the item at `index` and schedule its successor.
    async fn play_index(self: &Arc<Self>, index: usize) {
        let (item, token) = {
            let mut inner = self.inner.lock().await;
            if inner.session.is_cancelled() {
                return;
            }
            let Some(item) = inner.inventory.get(index).cloned() else {
                return;
            };
            inner.state = match item.kind {
                MediaKind::Image => PlayState::PlayingImage { index },
                MediaKind::Video => PlayState::PlayingVideo { index },
            };
            (item, inner.session.clone())
        };

        debug!(name = %item.name, index, kind = ?item.kind, "showing media item");
        self.event_bus
            .emit(CoreEvent::Playback(PlaybackEvent::ItemShown {
                name: item.name.clone(),
                index,
            }));

        match item.kind {
            MediaKind::Image => {
                match self.surface.upgrade() {
                    Some(surface) => {
                        if let Err(e) = surface.show_image(&item.path).await {
                            warn!(name = %item.name, error = %e, "surface rejected image, advancing on schedule anyway");
                        }
                    }
                    None => debug!("rendering surface gone, advancing on schedule"),
                }
                self.arm_slide_timer(index, token);
            }
            MediaKind::Video => match self.surface.upgrade() {
                Some(surface) => {
                    if let Err(e) = surface.start_video(&item.path).await {
                        // No completion signal will come for a video that
                        // never started; fall back to the slide timer so the
                        // show is not wedged on one bad file.
                        warn!(name = %item.name, error = %e, "surface rejected video, falling back to slide timer");
                        self.arm_slide_timer(index, token);
                    }
                }
                None => debug!("rendering surface gone, video will not be played"),
            },
        }
    }

    /// Arm the slide timer for the item at `index`.
    ///
    /// The timer task holds the scheduler weakly and re-checks both the
    /// session token and the current state before advancing, so a timer
    /// outliving `stop()` or a torn-down host fires into nothing.
    fn arm_slide_timer(self: &Arc<Self>, index: usize, token: CancellationToken) {
        let weak = Arc::downgrade(self);
        let duration = self.config.slide_duration;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    if let Some(scheduler) = weak.upgrade() {
                        scheduler.slide_elapsed(index, token).await;
                    }
                }
            }
        });
    }

    /// Timer callback: advance past the item the timer was armed for.
    async fn slide_elapsed(self: &Arc<Self>, index: usize, token: CancellationToken) {
        let next = {
            let inner = self.inner.lock().await;
            if token.is_cancelled() {
                return;
            }
            let current = match inner.state {
                PlayState::PlayingImage { index } | PlayState::PlayingVideo { index } => index,
                _ => return,
            };
            if current != index {
                // The schedule already moved on; this timer is stale.
                return;
            }
            index + 1
        };
        self.advance_to(next).await;
    }

    /// Move to `next`, or resynchronize and start over when the inventory is
    /// exhausted.
    async fn advance_to(self: &Arc<Self>, next: usize) {
        let resync_token = {
            let mut inner = self.inner.lock().await;
            if inner.session.is_cancelled() {
                return;
            }
            if next < inner.inventory.len() {
                None
            } else {
                info!("inventory exhausted, resynchronizing with the remote");
                inner.state = PlayState::AwaitingResync;
                Some(inner.session.clone())
            }
        };

        match resync_token {
            None => self.play_index(next).await,
            Some(token) => {
                self.sync.run().await;
                // A stop() issued while the sync ran wins; its cancellation
                // must not be undone by restarting playback here.
                if token.is_cancelled() {
                    debug!("stopped during resync, staying idle");
                    return;
                }
                self.start().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playing_states_are_playing() {
        assert!(PlayState::PlayingImage { index: 0 }.is_playing());
        assert!(PlayState::PlayingVideo { index: 3 }.is_playing());
        assert!(!PlayState::Idle.is_playing());
        assert!(!PlayState::AwaitingResync.is_playing());
    }
}
