//! # Retry Poller
//!
//! Watches the remote while the local inventory is empty.
//!
//! The poller sleeps a full interval before its first sync cycle, so an
//! unreachable remote never produces a tight retry loop. Each round runs one
//! sync cycle and re-reads the inventory: media present hands control back
//! to the playback scheduler, otherwise the poller sleeps again. Its token
//! is a child of the playback session, so `stop()` and host teardown cancel
//! a pending poll from any state.

use std::sync::Weak;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::scheduler::PlaybackScheduler;

/// One empty-inventory polling loop. Spawned by the scheduler; never more
/// than one alive per playback session.
pub struct RetryScheduler {
    scheduler: Weak<PlaybackScheduler>,
    token: CancellationToken,
    interval: Duration,
}

impl RetryScheduler {
    pub(crate) fn new(
        scheduler: Weak<PlaybackScheduler>,
        token: CancellationToken,
        interval: Duration,
    ) -> Self {
        Self {
            scheduler,
            token,
            interval,
        }
    }

    pub(crate) fn spawn(self) {
        debug!(interval_secs = self.interval.as_secs(), "retry poller armed");
        tokio::spawn(self.run());
    }

    async fn run(self) {
        loop {
            tokio::select! {
                _ = self.token.cancelled() => {
                    debug!("retry poller cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }

            // The scheduler is held weakly: if the host dropped it, the
            // poller dies with it instead of keeping it alive.
            let Some(scheduler) = self.scheduler.upgrade() else {
                debug!("scheduler gone, retry poller exiting");
                return;
            };

            debug!("retry poll: running sync cycle");
            scheduler.sync.run().await;
            if self.token.is_cancelled() {
                return;
            }

            let inventory = match scheduler.store.list().await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "could not list media root after poll");
                    Vec::new()
                }
            };

            if inventory.is_empty() {
                debug!("inventory still empty, polling again");
                continue;
            }

            info!(items = inventory.len(), "media appeared, starting playback");
            scheduler.poll_start(self.token.clone()).await;
            return;
        }
    }
}
